//! Application services

mod context;
mod error;
mod notification;
mod time_parse;
mod work_log;

pub use context::ServiceContext;
pub use error::{ServiceError, ServiceResult};
pub use notification::NotificationService;
pub use time_parse::DefaultTimeParser;
pub use work_log::WorkLogService;
