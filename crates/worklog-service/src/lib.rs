//! # worklog-service
//!
//! Application layer containing the work-log lifecycle (construction paths
//! and persistence hooks), the notification fan-out, and request DTOs.

pub mod dto;
pub mod services;

// Re-export commonly used types at crate root
pub use dto::LogWorkRequest;
pub use services::{
    DefaultTimeParser, NotificationService, ServiceContext, ServiceError, ServiceResult,
    WorkLogService,
};
