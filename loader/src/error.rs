//! Loader error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading a quote file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("File does not exist: {0}")]
    NotFound(PathBuf),

    #[error("Unsupported file format: {0} (expected .json or .csv)")]
    UnsupportedFormat(String),

    #[error("No quote records found in {0}")]
    Empty(PathBuf),

    #[error("Invalid quote document: {0}")]
    InvalidDocument(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// Result type for loader operations.
pub type LoadResult<T> = Result<T, LoadError>;
