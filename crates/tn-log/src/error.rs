//! Error types for tn-log.

use thiserror::Error;

/// Errors that can occur when exporting an event log.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),
}

/// Alias for `Result<T, LogError>`.
pub type LogResult<T> = Result<T, LogError>;
