//! Document synthesis: per-tool task specs and the top-level envelope.

use fastlane_meta_core::{ArgumentSpec, MetadataDocument, SettingsClass, TaskSpec};

use crate::infer::pascal_case;
use crate::pipeline::PipelineConfig;

/// Result of extracting one tool or action.
#[derive(Debug, Clone)]
pub struct ToolExtraction {
    /// Tool or action name.
    pub name: String,
    /// Source URL recorded for the fetch attempt.
    pub reference: String,
    /// Generated arguments, in source declaration order. Empty when the
    /// source yielded no usable options.
    pub arguments: Vec<ArgumentSpec>,
    /// Whether the source was an auto-discovered action.
    pub is_action: bool,
    /// Per-option warnings accumulated while parsing this source.
    pub warnings: Vec<String>,
}

/// Builds a task spec for one extraction, or `None` when it produced no
/// arguments (such tools are omitted from the document).
pub fn build_task(extraction: &ToolExtraction, base_class: &str) -> Option<TaskSpec> {
    if extraction.arguments.is_empty() {
        return None;
    }

    let definite_argument = if extraction.is_action {
        format!("run {}", extraction.name.to_lowercase())
    } else {
        extraction.name.to_lowercase()
    };

    Some(TaskSpec {
        postfix: pascal_case(&extraction.name),
        definite_argument,
        settings_class: SettingsClass {
            base_class: base_class.to_string(),
            properties: extraction.arguments.clone(),
        },
    })
}

/// Aggregates all extractions into the metadata document.
///
/// Reference URLs are unioned in first-occurrence order with duplicates
/// dropped; every fetch attempt contributes its URL, including tools that
/// yielded no task. Tasks keep input order.
pub fn synthesize_document(
    config: &PipelineConfig,
    extractions: &[ToolExtraction],
) -> MetadataDocument {
    let mut references: Vec<String> = Vec::new();
    for extraction in extractions {
        if !references.contains(&extraction.reference) {
            references.push(extraction.reference.clone());
        }
    }

    let tasks = extractions
        .iter()
        .filter_map(|extraction| build_task(extraction, &config.base_class))
        .collect();

    MetadataDocument {
        schema: config.schema_ref.clone(),
        license: config.license.clone(),
        references,
        custom_executable: true,
        name: config.document_name.clone(),
        tasks,
    }
}
