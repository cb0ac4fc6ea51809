use thiserror::Error;

/// Errors during export
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    #[error("No documents selected for export")]
    NothingSelected,

    #[error("Two export files would be named {0}")]
    DuplicateFileName(String),
}
