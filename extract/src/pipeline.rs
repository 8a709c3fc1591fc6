//! Fan-out pipeline over tools and actions.
//!
//! Per-tool fetch-and-parse work items are independent and run on a bounded
//! rayon pool; a fan-in barrier collects every item (success or failure)
//! before the first fetch error aborts the run. Synthesis and writing happen
//! strictly after the barrier, single-threaded.

use std::path::Path;

use rayon::prelude::*;
use tracing::info;

use fastlane_meta_core::MetadataDocument;

use crate::source::{ActionCatalog, SourceError, SourceFetcher};
use crate::synth::{self, ToolExtraction};
use crate::writer::{WriteError, WriteOutcome, write_document};

/// The named fastlane tools whose option sources are always fetched.
pub const DEFAULT_TOOLS: &[&str] = &[
    "cert", "deliver", "frameit", "gym", "match", "pem", "pilot", "precheck", "produce", "scan",
    "screengrab", "sigh", "snapshot", "supply",
];

/// URL template for a named tool's options file; `{tool}` is replaced with
/// the lowercased tool name.
pub const DEFAULT_URL_TEMPLATE: &str =
    "https://raw.githubusercontent.com/fastlane/fastlane/master/{tool}/lib/{tool}/options.rb";

/// Explicit configuration for one pipeline run.
///
/// All ambient constants (tool list, URL template, document envelope) live
/// here rather than as globals, so tests and alternative deployments can
/// swap them wholesale.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Named tools to fetch.
    pub tools: Vec<String>,
    /// Source locator template with a `{tool}` placeholder.
    pub url_template: String,
    /// Top-level document name.
    pub document_name: String,
    /// Schema pointer embedded in the document.
    pub schema_ref: String,
    /// License header lines embedded in the document.
    pub license: Vec<String>,
    /// Settings base class name for generated tasks.
    pub base_class: String,
    /// Number of parallel fetch jobs (`None` = adaptive default).
    pub jobs: Option<usize>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tools: DEFAULT_TOOLS.iter().map(|tool| tool.to_string()).collect(),
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            document_name: "Fastlane".to_string(),
            schema_ref: "./_schema.json".to_string(),
            license: vec![
                "Copyright Sebastian Karasek 2017.".to_string(),
                "Distributed under the MIT License.".to_string(),
                "https://github.com/Arodus/nuke-tools-fastlane/blob/master/LICENSE".to_string(),
            ],
            base_class: "FastlaneBaseSettings".to_string(),
            jobs: None,
        }
    }
}

impl PipelineConfig {
    /// Resolves the source locator for a named tool.
    pub fn tool_url(&self, tool: &str) -> String {
        self.url_template.replace("{tool}", &tool.to_lowercase())
    }
}

/// Errors that abort a pipeline run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// A source fetch failed; fatal, no retry, no partial output.
    #[error("fetch failed: {0}")]
    Fetch(#[from] SourceError),

    /// Writing the synthesized document failed.
    #[error("write failed: {0}")]
    Write(#[from] WriteError),
}

/// Aggregated output of a successful pipeline run.
#[derive(Debug, Clone)]
pub struct PipelineOutcome {
    /// The synthesized metadata document.
    pub document: MetadataDocument,
    /// Per-option warnings from all sources, in input order.
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone)]
struct WorkItem {
    name: String,
    url: String,
    is_action: bool,
}

/// Runs the full extraction pipeline: fan-out fetch-and-parse over every
/// tool and non-colliding action, fan-in, then document synthesis.
///
/// Actions whose names collide with configured tools are skipped. Any fetch
/// failure aborts the run after the barrier; per-option parse failures only
/// produce warnings.
pub fn run_pipeline(
    config: &PipelineConfig,
    fetcher: &dyn SourceFetcher,
    catalog: &dyn ActionCatalog,
) -> Result<PipelineOutcome, PipelineError> {
    let mut items: Vec<WorkItem> = config
        .tools
        .iter()
        .map(|tool| WorkItem {
            name: tool.clone(),
            url: config.tool_url(tool),
            is_action: false,
        })
        .collect();

    for action in catalog.list_actions()? {
        if config.tools.iter().any(|tool| *tool == action.name) {
            continue;
        }
        items.push(WorkItem {
            name: action.name,
            url: action.url,
            is_action: true,
        });
    }

    info!(items = items.len(), "fetching option sources");

    let jobs = config
        .jobs
        .filter(|jobs| *jobs > 0)
        .unwrap_or_else(|| default_parallel_jobs(items.len()));
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs)
        .build()
        .expect("failed to build rayon thread pool");

    let results: Vec<Result<ToolExtraction, SourceError>> = pool.install(|| {
        items
            .par_iter()
            .map(|item| {
                let text = fetcher.fetch_source(&item.name, &item.url)?;
                let parse = crate::parse_options_source(&item.name, &text, item.is_action);
                Ok(ToolExtraction {
                    name: item.name.clone(),
                    reference: item.url.clone(),
                    arguments: parse.arguments,
                    is_action: item.is_action,
                    warnings: parse.warnings,
                })
            })
            .collect()
    });

    // Fan-in barrier: every item has finished before the first failure
    // aborts the run.
    let mut extractions = Vec::with_capacity(results.len());
    for result in results {
        extractions.push(result?);
    }

    let warnings: Vec<String> = extractions
        .iter()
        .flat_map(|extraction| extraction.warnings.iter().cloned())
        .collect();
    let document = synth::synthesize_document(config, &extractions);
    info!(
        tasks = document.tasks.len(),
        references = document.references.len(),
        "synthesized metadata document"
    );

    Ok(PipelineOutcome { document, warnings })
}

/// Runs the pipeline and writes the document idempotently to `output`.
pub fn run_and_write(
    config: &PipelineConfig,
    fetcher: &dyn SourceFetcher,
    catalog: &dyn ActionCatalog,
    output: &Path,
) -> Result<(PipelineOutcome, WriteOutcome), PipelineError> {
    let outcome = run_pipeline(config, fetcher, catalog)?;
    let write = write_document(output, &outcome.document)?;
    Ok((outcome, write))
}

fn default_parallel_jobs(item_count: usize) -> usize {
    let cpu_count = std::thread::available_parallelism()
        .map(|parallelism| parallelism.get())
        .unwrap_or(4);
    cpu_count.clamp(1, 8).min(item_count.max(1))
}
