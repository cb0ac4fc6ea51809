//! Error types for Firelens

use thiserror::Error;

/// Core error type for Firelens operations
#[derive(Error, Debug)]
pub enum FirelensError {
    /// Bad or incomplete credentials, or the client could not be created
    #[error("Connection error: {0}")]
    Connection(String),

    /// A collection or document read failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// A create/update/delete/batch write failed
    #[error("Write error: {0}")]
    Write(String),

    /// User-supplied text does not parse as the expected structured data
    #[error("Invalid format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl FirelensError {
    /// Whether the error was caught locally, before any network call
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            FirelensError::InvalidFormat(_) | FirelensError::Configuration(_)
        )
    }
}

/// Result type alias for Firelens operations
pub type Result<T> = std::result::Result<T, FirelensError>;
