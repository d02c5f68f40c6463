//! Ports - traits the infrastructure layers implement

mod custom_attributes;
mod mailer;
mod repositories;
mod time_parser;

pub use custom_attributes::{CustomAttributeValidator, PermissiveAttributeValidator};
pub use mailer::{MailAttachment, Mailer, UpdateKind};
pub use repositories::{
    CalendarEntryRepository, EmailDeliveryRepository, EventLogRepository, ProjectRepository,
    RepoResult, TaskRepository, UserRepository, WorkLogNotificationRepository, WorkLogRepository,
};
pub use time_parser::TimeParser;
