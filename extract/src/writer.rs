//! Idempotent document writing.
//!
//! The serialized document is compared byte-for-byte against any existing
//! output. Unchanged content is a no-op; differing content is written to an
//! adjacent `.new` path so manual edits are never silently overwritten.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use fastlane_meta_core::MetadataDocument;

/// Errors that can occur while writing the metadata document.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Filesystem I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// How the writer resolved the target location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteOutcome {
    /// No file existed; the document was written to the target path.
    Created(PathBuf),
    /// An identical file already existed; nothing was written.
    Unchanged,
    /// A differing file existed; the document was written to the adjacent
    /// path carried here, leaving the original untouched.
    Diverged(PathBuf),
}

/// Serializes the document and writes it idempotently to `path`.
///
/// # Examples
///
/// ```no_run
/// use std::path::Path;
/// use fastlane_meta_core::MetadataDocument;
/// use fastlane_meta_extract::writer::{WriteOutcome, write_document};
///
/// # fn demo(document: &MetadataDocument) -> Result<(), fastlane_meta_extract::writer::WriteError> {
/// match write_document(Path::new("metadata/Fastlane.json"), document)? {
///     WriteOutcome::Created(path) => println!("written to {}", path.display()),
///     WriteOutcome::Unchanged => println!("already up to date"),
///     WriteOutcome::Diverged(path) => println!("divergent copy at {}", path.display()),
/// }
/// # Ok(())
/// # }
/// ```
pub fn write_document(path: &Path, document: &MetadataDocument) -> Result<WriteOutcome, WriteError> {
    let rendered = document.to_json_pretty()?;
    write_if_changed(path, &rendered)
}

fn write_if_changed(path: &Path, content: &str) -> Result<WriteOutcome, WriteError> {
    if path.exists() {
        let existing = fs::read_to_string(path)?;
        if existing == content {
            info!(path = %path.display(), "metadata is already up to date");
            return Ok(WriteOutcome::Unchanged);
        }

        let sibling = adjacent_path(path);
        fs::write(&sibling, content)?;
        info!(path = %sibling.display(), "existing metadata differs, wrote adjacent copy");
        return Ok(WriteOutcome::Diverged(sibling));
    }

    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    info!(path = %path.display(), "metadata written");
    Ok(WriteOutcome::Created(path.to_path_buf()))
}

fn adjacent_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".new");
    PathBuf::from(name)
}
