//! Error types for the track pipeline.

use thiserror::Error;

/// Main error type for all pipeline operations.
#[derive(Debug, Error)]
pub enum TrackfetchError {
    /// Unknown data source name.
    #[error("Unknown source: {0}. Use 'beatport' or 'spotify'")]
    InvalidSource(String),

    /// External program could not be started.
    #[error("Command not found: {0}")]
    CommandNotFound(String),

    /// External program exited with a non-zero status.
    #[error("{program} failed: {stderr}")]
    CommandFailed {
        /// Program that was run.
        program: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// HTTP request failed.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    ParseError(#[from] serde_json::Error),

    /// CSV reading or writing failed.
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// I/O operation failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, TrackfetchError>;
