//! Log file discovery.
//!
//! Scans a single folder (not recursively) for files whose extension matches
//! the configured one, ignoring case, so `app.Log` and `app.LOG` both match
//! `log`. Results are sorted by file name so repeated runs process files in
//! the same order.

use std::fs;
use std::path::{Path, PathBuf};

use crate::ingest::IngestError;

/// Normalize an extension setting: drop a leading dot and surrounding spaces.
pub fn normalize_extension(extension: &str) -> &str {
    extension.trim().trim_start_matches('.')
}

/// True if `path` has the given extension, compared case-insensitively.
pub fn has_extension(path: &Path, extension: &str) -> bool {
    let wanted = normalize_extension(extension);
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case(wanted))
        .unwrap_or(false)
}

/// List the log files directly inside `dir`.
///
/// # Errors
///
/// - [`IngestError::InputNotFound`] if `dir` does not exist or is not a folder
/// - [`IngestError::Open`] if the folder cannot be listed
/// - [`IngestError::NoLogFiles`] if nothing matches
pub fn discover_log_files(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, IngestError> {
    let extension = normalize_extension(extension);

    if !dir.is_dir() {
        return Err(IngestError::InputNotFound {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    let entries = fs::read_dir(dir).map_err(|source| IngestError::Open {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && has_extension(path, extension))
        .collect();

    if files.is_empty() {
        return Err(IngestError::NoLogFiles {
            path: dir.to_path_buf(),
            extension: extension.to_string(),
        });
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    tracing::info!(count = files.len(), dir = %dir.display(), "discovered log files");
    Ok(files)
}
