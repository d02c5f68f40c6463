//! # worklog-core
//!
//! Domain layer containing entities, value objects, repository traits, and
//! collaborator ports for the work-log component.
//! This crate has zero dependencies on infrastructure (database, mail transport, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    CalendarEntry, DeliveryStatus, EmailAddress, EmailDelivery, EventLog, LogType, Project, Task,
    User, WorkLog,
};
pub use error::DomainError;
pub use traits::{
    CalendarEntryRepository, CustomAttributeValidator, EmailDeliveryRepository,
    EventLogRepository, MailAttachment, Mailer, PermissiveAttributeValidator, ProjectRepository,
    RepoResult, TaskRepository, TimeParser, UpdateKind, UserRepository,
    WorkLogNotificationRepository, WorkLogRepository,
};
pub use value_objects::AccessLevel;
