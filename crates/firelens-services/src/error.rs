use thiserror::Error;

use firelens_interchange::ExportError;

use crate::Notification;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service-level errors with user-friendly messages
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Local validation failed; nothing was sent to the store
    #[error("{0}")]
    InvalidInput(String),

    #[error("Unknown driver: {0}")]
    UnknownDriver(String),

    #[error("Failed to connect to Firebase: {0}")]
    ConnectionFailed(String),

    #[error("Failed to load collection '{collection}': {message}")]
    LoadFailed { collection: String, message: String },

    #[error("Failed to add document: {0}")]
    CreateFailed(String),

    #[error("Failed to create collection: {0}")]
    CollectionCreateFailed(String),

    #[error("Failed to update document: {0}")]
    UpdateFailed(String),

    #[error("Failed to delete document: {0}")]
    DeleteFailed(String),

    #[error("Failed to duplicate document: {0}")]
    DuplicateFailed(String),

    /// Some writes of a batch failed; the others stay applied
    #[error("Failed to {action} {} of {total} documents ({}): {message}", .failed.len(), .failed.join(", "))]
    BatchFailed {
        action: &'static str,
        failed: Vec<String>,
        total: usize,
        message: String,
    },

    #[error("Failed to export documents: {0}")]
    ExportFailed(String),
}

impl ServiceError {
    /// Whether the action was rejected before reaching the store
    pub fn is_local(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::UnknownDriver(_))
    }

    /// The one notification shown for this failure
    pub fn notification(&self) -> Notification {
        Notification::error(self.to_string())
    }
}

impl From<ExportError> for ServiceError {
    fn from(e: ExportError) -> Self {
        match e {
            ExportError::NothingSelected => ServiceError::InvalidInput(e.to_string()),
            other => ServiceError::ExportFailed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NotificationLevel;

    #[test]
    fn test_batch_failed_message_names_ids_once() {
        let err = ServiceError::BatchFailed {
            action: "update",
            failed: vec!["b".into()],
            total: 2,
            message: "permission denied".into(),
        };
        assert_eq!(
            err.to_string(),
            "Failed to update 1 of 2 documents (b): permission denied"
        );
        let note = err.notification();
        assert_eq!(note.level, NotificationLevel::Error);
        assert_eq!(note.message, err.to_string());
    }

    #[test]
    fn test_export_errors() {
        assert!(ServiceError::from(ExportError::NothingSelected).is_local());
        let io = ExportError::Io(std::io::Error::other("disk full"));
        assert!(matches!(ServiceError::from(io), ServiceError::ExportFailed(_)));
    }
}
