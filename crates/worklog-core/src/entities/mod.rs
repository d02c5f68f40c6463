//! Domain entities - core business objects

mod calendar;
mod delivery;
mod email_address;
mod event_log;
mod project;
mod task;
mod user;
mod work_log;

pub use calendar::CalendarEntry;
pub use delivery::{DeliveryStatus, EmailDelivery};
pub use email_address::EmailAddress;
pub use event_log::EventLog;
pub use project::Project;
pub use task::Task;
pub use user::User;
pub use work_log::{LogType, WorkLog};
