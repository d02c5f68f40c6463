//! Repository traits (ports) - define the interface for data access
//!
//! The domain layer defines what it needs, and the infrastructure layer
//! provides the implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::entities::{EmailAddress, EmailDelivery, EventLog, Project, Task, User, WorkLog};
use crate::error::DomainError;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

// ============================================================================
// WorkLog Repository
// ============================================================================

#[async_trait]
pub trait WorkLogRepository: Send + Sync {
    /// Find work log by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<WorkLog>>;

    /// Insert a new work log, returning it with its assigned ID
    async fn create(&self, work_log: &WorkLog) -> RepoResult<WorkLog>;

    /// Update an existing work log
    async fn update(&self, work_log: &WorkLog) -> RepoResult<()>;

    /// Persist only the body text (used by the notification trailer)
    async fn update_body(&self, id: i64, body: &str) -> RepoResult<()>;

    /// Delete a work log (cascades to event log, calendar entry, deliveries)
    async fn delete(&self, id: i64) -> RepoResult<()>;

    /// Sum of logged durations for a task, in seconds
    async fn total_duration(&self, task_id: i64) -> RepoResult<i64>;

    /// Scope: entries flagged as comment or typed as task-comment
    async fn comments(&self) -> RepoResult<Vec<WorkLog>>;

    /// Scope: entries on tasks the given user is assigned to
    async fn on_tasks_owned_by(&self, user_id: i64) -> RepoResult<Vec<WorkLog>>;

    /// Scope: entries the user may see - project open, project grants
    /// visibility (see-unwatched permission or task assignment), same
    /// company, record level at or below the user's level
    async fn accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>>;

    /// Scope: access-level threshold filter only
    async fn level_accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>>;

    /// Scope: administrative variant of `accessed_by` without the company filter
    async fn all_accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>>;
}

// ============================================================================
// EventLog Repository
// ============================================================================

#[async_trait]
pub trait EventLogRepository: Send + Sync {
    /// Insert the audit entry paired with a work log
    async fn create(&self, event_log: &EventLog) -> RepoResult<EventLog>;

    /// Find the audit entry for a work log
    async fn find_by_work_log(&self, work_log_id: i64) -> RepoResult<Option<EventLog>>;

    /// Re-sync the audit entry's creation time to the work log's start time
    async fn sync_created_at(&self, work_log_id: i64, created_at: DateTime<Utc>) -> RepoResult<()>;
}

// ============================================================================
// EmailDelivery Repository
// ============================================================================

#[async_trait]
pub trait EmailDeliveryRepository: Send + Sync {
    /// Insert a new delivery record, returning it with its assigned ID
    async fn create(&self, delivery: &EmailDelivery) -> RepoResult<EmailDelivery>;

    /// Queued deliveries for a work log, oldest first
    async fn find_queued(&self, work_log_id: i64) -> RepoResult<Vec<EmailDelivery>>;

    /// Transition a delivery to sent
    async fn mark_sent(&self, id: i64) -> RepoResult<()>;

    /// Look up the address a delivery targets
    async fn email_address(&self, delivery_id: i64) -> RepoResult<Option<EmailAddress>>;
}

// ============================================================================
// CalendarEntry Repository
// ============================================================================

#[async_trait]
pub trait CalendarEntryRepository: Send + Sync {
    /// Remove the exported calendar entry for a work log, if any
    async fn delete_for_work_log(&self, work_log_id: i64) -> RepoResult<()>;
}

// ============================================================================
// Task Repository
// ============================================================================

#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Find task by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Task>>;

    /// Customers attached to the task, in attachment order
    async fn customer_ids(&self, task_id: i64) -> RepoResult<Vec<i64>>;

    /// Email addresses registered directly on the task
    async fn email_addresses(&self, task_id: i64) -> RepoResult<Vec<EmailAddress>>;

    /// Users assigned to the task
    async fn assigned_users(&self, task_id: i64) -> RepoResult<Vec<User>>;

    /// Watchers and owners who want notifications about the task, with the
    /// acting user filtered out
    async fn users_to_notify(&self, task_id: i64, acting_user_id: Option<i64>)
        -> RepoResult<Vec<User>>;

    /// Recompute the task's worked minutes from its logged durations and
    /// persist the new value, returning it
    async fn recalculate_worked_minutes(&self, task_id: i64) -> RepoResult<i64>;

    /// Flag the task unread for every assigned user not in `excluded_user_ids`
    async fn mark_unread(&self, task_id: i64, excluded_user_ids: &[i64]) -> RepoResult<()>;
}

// ============================================================================
// Project Repository
// ============================================================================

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    /// Find project by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Project>>;
}

// ============================================================================
// User Repository
// ============================================================================

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>>;

    /// The user's default email address, if one is flagged
    async fn default_email_address(&self, user_id: i64) -> RepoResult<Option<EmailAddress>>;

    /// Find a bare email address row by ID
    async fn find_email_address(&self, id: i64) -> RepoResult<Option<EmailAddress>>;
}

// ============================================================================
// WorkLogNotification Repository
// ============================================================================

#[async_trait]
pub trait WorkLogNotificationRepository: Send + Sync {
    /// Replace the set of users recorded as notified for a work log
    async fn replace(&self, work_log_id: i64, user_ids: &[i64]) -> RepoResult<()>;

    /// Users recorded as notified for a work log
    async fn notified_user_ids(&self, work_log_id: i64) -> RepoResult<Vec<i64>>;
}
