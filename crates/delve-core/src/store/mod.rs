//! Link graph storage
//!
//! Two flat-file stores back the note graph:
//!
//! - [`Vault`]: one markdown file per note. The set of known identifiers is
//!   always derived by listing the directory, never cached.
//! - [`QueueFile`]: ordered, deduplicated identifiers awaiting research.
//!
//! Neither store locks. A single writer is assumed.

mod queue;
mod vault;

pub use queue::QueueFile;
pub use vault::Vault;

use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    /// I/O failure on a specific path
    #[error("I/O error on {path}: {source}")]
    Io {
        /// File or directory involved
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// Identifier cannot be stored in a line-oriented queue
    #[error("Identifier contains a line break: {0:?}")]
    MultilineIdentifier(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

pub(crate) fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> StoreError + '_ {
    move |source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Replace `path` with `contents` in one step.
///
/// Writes a temp file beside the target and renames it over, so readers
/// never observe a half-written file.
pub(crate) fn write_atomic(path: &Path, contents: &str) -> StoreResult<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir).map_err(io_error(dir))?;

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(io_error(dir))?;
    tmp.write_all(contents.as_bytes()).map_err(io_error(path))?;
    tmp.flush().map_err(io_error(path))?;
    tmp.persist(path).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        source: e.error,
    })?;
    Ok(())
}
