//! Source fetching collaborators.
//!
//! The pipeline is transport-agnostic: it only needs something that returns
//! the raw source text for a tool's option declarations, and something that
//! enumerates auto-discovered actions. Both are traits so that a network
//! fetcher, a local checkout, or a test double can slot in.
//! [`DirectorySource`] is the filesystem-backed implementation used by the
//! CLI and the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

/// Errors raised by source collaborators.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Filesystem I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The source for a tool could not be obtained.
    #[error("source for '{tool}' unavailable: {detail}")]
    Unavailable { tool: String, detail: String },
}

/// An auto-discovered action: identifier plus source locator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionRef {
    /// Action name (file stem of the source).
    pub name: String,
    /// Locator understood by the paired [`SourceFetcher`].
    pub url: String,
}

/// Returns raw source text for one tool or action.
pub trait SourceFetcher: Sync {
    /// Fetches the source text behind `url`. `tool` is the identifier the
    /// locator was minted for, carried for error reporting.
    fn fetch_source(&self, tool: &str, url: &str) -> Result<String, SourceError>;
}

/// Enumerates the available auto-discovered actions.
pub trait ActionCatalog: Sync {
    fn list_actions(&self) -> Result<Vec<ActionRef>, SourceError>;
}

/// Filesystem-backed source: tool options at `<root>/<tool>.rb`, actions
/// under `<root>/actions/*.rb`.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Locator for a named tool's options file, suitable as the pipeline's
    /// URL template base (`<root>/{tool}.rb`).
    pub fn url_template(&self) -> String {
        format!("{}/{{tool}}.rb", self.root.display())
    }

    fn actions_dir(&self) -> PathBuf {
        self.root.join("actions")
    }
}

impl SourceFetcher for DirectorySource {
    fn fetch_source(&self, tool: &str, url: &str) -> Result<String, SourceError> {
        debug!(tool, url, "reading source file");
        fs::read_to_string(Path::new(url)).map_err(|err| SourceError::Unavailable {
            tool: tool.to_string(),
            detail: format!("{}: {err}", url),
        })
    }
}

impl ActionCatalog for DirectorySource {
    /// Lists `.rb` files under the actions directory, sorted by name for
    /// deterministic ordering. A missing directory means no actions.
    fn list_actions(&self) -> Result<Vec<ActionRef>, SourceError> {
        let dir = self.actions_dir();
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut actions = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("rb") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };
            actions.push(ActionRef {
                name: stem.to_string(),
                url: path.display().to_string(),
            });
        }

        actions.sort_by(|a, b| a.name.cmp(&b.name));
        debug!(count = actions.len(), "discovered actions");
        Ok(actions)
    }
}
