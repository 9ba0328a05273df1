//! Error types for hazmap-io.

use thiserror::Error;

use hazmap_network::NetworkError;

/// Errors that can occur when loading inputs or writing routes.
#[derive(Debug, Error)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A record parsed but its values are out of range.
    #[error("parse error: {0}")]
    Parse(String),

    #[error(transparent)]
    Network(#[from] NetworkError),
}

/// Alias for `Result<T, IoError>`.
pub type IoResult<T> = Result<T, IoError>;
