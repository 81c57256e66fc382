//! Error types and load result structures for the schedule loader.

use std::path::PathBuf;

/// Errors that can occur while loading schedule files.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// Filesystem I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parse/deserialization error.
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Record is structurally unusable (e.g. empty id).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Filesystem watcher error.
    #[error("Notify watcher error: {0}")]
    Notify(#[from] notify::Error),
}

/// Result alias for loader operations.
pub type Result<T> = std::result::Result<T, LoadError>;

/// Outcome of loading a single schedule file.
#[derive(Debug)]
pub struct LoadResult {
    /// Path to the file that was loaded.
    pub path: PathBuf,
    /// Status of the load attempt.
    pub status: LoadStatus,
}

/// Status of a single file load attempt.
#[derive(Debug)]
pub enum LoadStatus {
    /// Schedule was successfully loaded.
    Loaded { schedule_id: String, location_id: String },
    /// File was skipped (dotfile, non-YAML, etc.).
    Skipped { reason: String },
    /// Parse or validation error occurred.
    Failed { error: String },
}
