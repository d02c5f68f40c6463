//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use worklog_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Create a "work log not found" error
pub fn work_log_not_found(id: i64) -> DomainError {
    DomainError::WorkLogNotFound(id)
}

/// Create a "task not found" error
pub fn task_not_found(id: i64) -> DomainError {
    DomainError::TaskNotFound(id)
}

/// Create an "event log not found" error
pub fn event_log_not_found(work_log_id: i64) -> DomainError {
    DomainError::EventLogNotFound(work_log_id)
}

/// Create a "delivery not found" error
pub fn delivery_not_found(id: i64) -> DomainError {
    DomainError::DeliveryNotFound(id)
}
