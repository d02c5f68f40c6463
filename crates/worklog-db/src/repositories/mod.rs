//! PostgreSQL repository implementations

mod calendar;
mod delivery;
mod error;
mod event_log;
mod notification;
mod project;
mod task;
mod user;
mod work_log;

pub use calendar::PgCalendarEntryRepository;
pub use delivery::PgEmailDeliveryRepository;
pub use event_log::PgEventLogRepository;
pub use notification::PgWorkLogNotificationRepository;
pub use project::PgProjectRepository;
pub use task::PgTaskRepository;
pub use user::PgUserRepository;
pub use work_log::PgWorkLogRepository;
