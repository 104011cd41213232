//! Failures of the ingest layer.
//!
//! Only I/O can fail here. Record-level problems (short or garbled records)
//! are not errors; they surface as [`Classification::Unclassifiable`].
//!
//! [`Classification::Unclassifiable`]: super::Classification::Unclassifiable

use std::io;
use std::path::PathBuf;

/// Errors raised while locating or reading log files.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input directory does not exist. Fatal for the whole run.
    #[error("Input folder not found: {path}. Create it and add your .{extension} files.")]
    InputNotFound { path: PathBuf, extension: String },

    /// The input directory exists but holds no matching files. Fatal.
    #[error("No .{extension} files found in {path}")]
    NoLogFiles { path: PathBuf, extension: String },

    /// A single file could not be opened. The run skips it.
    #[error("Failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A single file failed mid-read (including invalid UTF-8). The run skips it.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl IngestError {
    /// True for errors that end the run rather than skipping one file.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            IngestError::InputNotFound { .. } | IngestError::NoLogFiles { .. }
        )
    }
}
