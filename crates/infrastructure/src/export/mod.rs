//! Export infrastructure.
//!
//! Writes log export artifacts produced by the logger to disk.

use std::path::{Path, PathBuf};

use janitor_application::LogExport;
use thiserror::Error;
use tokio::fs;

/// Export error type.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The artifact could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Target path.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },
}

/// Writes `export` into `dir` under its own file name and returns the path.
///
/// The directory is created if missing; an existing file with the same
/// name is replaced.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub async fn write_export(dir: &Path, export: &LogExport) -> Result<PathBuf, ExportError> {
    let path = dir.join(&export.file_name);
    let to_error = |source| ExportError::Write {
        path: path.clone(),
        source,
    };

    fs::create_dir_all(dir).await.map_err(to_error)?;
    fs::write(&path, export.contents.as_bytes())
        .await
        .map_err(to_error)?;
    tracing::debug!(path = %path.display(), "log export written");
    Ok(path)
}
