//! Domain errors - error types for the domain layer

use thiserror::Error;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Work log not found: {0}")]
    WorkLogNotFound(i64),

    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Project not found: {0}")]
    ProjectNotFound(i64),

    #[error("Event log not found for work log: {0}")]
    EventLogNotFound(i64),

    #[error("Email delivery not found: {0}")]
    DeliveryNotFound(i64),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Duration must not be negative: {0}")]
    NegativeDuration(i64),

    #[error("Custom attribute check failed: {0}")]
    CustomAttributeInvalid(String),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Mailer error: {0}")]
    MailerError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for logs and API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::WorkLogNotFound(_) => "UNKNOWN_WORK_LOG",
            Self::TaskNotFound(_) => "UNKNOWN_TASK",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ProjectNotFound(_) => "UNKNOWN_PROJECT",
            Self::EventLogNotFound(_) => "UNKNOWN_EVENT_LOG",
            Self::DeliveryNotFound(_) => "UNKNOWN_DELIVERY",
            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::NegativeDuration(_) => "NEGATIVE_DURATION",
            Self::CustomAttributeInvalid(_) => "CUSTOM_ATTRIBUTE_INVALID",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::MailerError(_) => "MAILER_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::WorkLogNotFound(_)
                | Self::TaskNotFound(_)
                | Self::UserNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::EventLogNotFound(_)
                | Self::DeliveryNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_) | Self::NegativeDuration(_) | Self::CustomAttributeInvalid(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(DomainError::WorkLogNotFound(1).code(), "UNKNOWN_WORK_LOG");
        assert_eq!(
            DomainError::CustomAttributeInvalid("missing billing code".into()).code(),
            "CUSTOM_ATTRIBUTE_INVALID"
        );
    }

    #[test]
    fn test_classification() {
        assert!(DomainError::TaskNotFound(1).is_not_found());
        assert!(!DomainError::TaskNotFound(1).is_validation());
        assert!(DomainError::NegativeDuration(-5).is_validation());
        assert!(!DomainError::DatabaseError("boom".into()).is_validation());
    }
}
