//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Reminder store failure
    #[error("Storage error: {0}")]
    Storage(String),

    /// Notification delivery failure
    #[error("Notification failed: {0}")]
    Notification(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Storage(_) | Self::Notification(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_is_transparent() {
        let err: ApplicationError = DomainError::ValidationError("bad".to_string()).into();
        assert_eq!(err.to_string(), "Validation failed: bad");
        assert!(!err.is_retryable());
    }

    #[test]
    fn io_like_errors_are_retryable() {
        assert!(ApplicationError::Storage("locked".to_string()).is_retryable());
        assert!(ApplicationError::Notification("smtp down".to_string()).is_retryable());
        assert!(!ApplicationError::Internal("bug".to_string()).is_retryable());
    }
}
