//! # worklog-db
//!
//! Database layer implementing the `worklog-core` repository traits with
//! PostgreSQL via SQLx. It handles:
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Repository implementations, including the work-log visibility scopes

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{
    PgCalendarEntryRepository, PgEmailDeliveryRepository, PgEventLogRepository,
    PgProjectRepository, PgTaskRepository, PgUserRepository, PgWorkLogNotificationRepository,
    PgWorkLogRepository,
};
