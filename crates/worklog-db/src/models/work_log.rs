//! Work log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the work_logs table
#[derive(Debug, Clone, FromRow)]
pub struct WorkLogModel {
    pub id: i64,
    pub user_id: Option<i64>,
    pub email_address_id: Option<i64>,
    pub task_id: i64,
    pub project_id: i64,
    pub company_id: i64,
    pub customer_id: Option<i64>,
    pub access_level: i32,
    pub started_at: DateTime<Utc>,
    pub duration: i64,
    pub paused_duration: i64,
    pub body: String,
    pub log_type: i32,
    pub comment: bool,
    pub exported_at: Option<DateTime<Utc>>,
    pub approved: Option<bool>,
}

impl WorkLogModel {
    /// Check if the entry has been exported for billing
    #[inline]
    pub fn is_exported(&self) -> bool {
        self.exported_at.is_some()
    }
}
