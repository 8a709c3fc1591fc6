//! Task and document envelope types.
//!
//! A [`TaskSpec`] bundles one tool's generated arguments behind a settings
//! class; a [`MetadataDocument`] is the single top-level artifact the
//! pipeline writes to disk. Field order is fixed by struct declaration order
//! so serialization is deterministic.

use serde::{Deserialize, Serialize};

use crate::ArgumentSpec;

/// Nested descriptor bundling a task's argument specs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsClass {
    /// Name of the settings base class the generator derives from.
    pub base_class: String,
    /// Generated argument descriptors, in source declaration order.
    pub properties: Vec<ArgumentSpec>,
}

/// One target tool's complete description.
///
/// # Examples
///
/// ```
/// use fastlane_meta_core::{SettingsClass, TaskSpec};
///
/// let task = TaskSpec {
///     postfix: "Pilot".into(),
///     definite_argument: "pilot".into(),
///     settings_class: SettingsClass {
///         base_class: "FastlaneBaseSettings".into(),
///         properties: Vec::new(),
///     },
/// };
/// let json = serde_json::to_string(&task).unwrap();
/// assert!(json.contains("\"definiteArgument\":\"pilot\""));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskSpec {
    /// Identifier derived from the tool name (e.g. `GetPushCertificate`).
    pub postfix: String,
    /// Literal invocation prefix (`pilot`, or `run <action>` for actions).
    pub definite_argument: String,
    /// Settings class holding the generated arguments.
    pub settings_class: SettingsClass,
}

/// The top-level synthesized metadata document.
///
/// Aggregates every task spec plus the fixed document envelope: schema
/// pointer, license block, deduplicated source references, capability flag,
/// and document name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataDocument {
    /// Pointer to the JSON schema describing this document.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// License header lines carried into generated code.
    pub license: Vec<String>,
    /// Source URLs the document was synthesized from, first-occurrence order,
    /// no duplicates.
    pub references: Vec<String>,
    /// Marks the tool family as using a custom executable.
    pub custom_executable: bool,
    /// Document name (e.g. `Fastlane`).
    pub name: String,
    /// Tool descriptors, in input order. Tools that yielded zero arguments
    /// are excluded.
    pub tasks: Vec<TaskSpec>,
}

impl MetadataDocument {
    /// Serializes the document as pretty-printed JSON with deterministic
    /// field ordering.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
