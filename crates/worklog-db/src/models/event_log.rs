//! Event log database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the event_logs table
#[derive(Debug, Clone, FromRow)]
pub struct EventLogModel {
    pub id: i64,
    pub work_log_id: i64,
    pub company_id: i64,
    pub project_id: i64,
    pub user_id: Option<i64>,
    pub event_type: i32,
    pub created_at: DateTime<Utc>,
}
