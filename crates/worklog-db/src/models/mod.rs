//! Database models mapped to table rows

mod delivery;
mod event_log;
mod project;
mod task;
mod user;
mod work_log;

pub use delivery::EmailDeliveryModel;
pub use event_log::EventLogModel;
pub use project::ProjectModel;
pub use task::TaskModel;
pub use user::{EmailAddressModel, UserModel};
pub use work_log::WorkLogModel;
