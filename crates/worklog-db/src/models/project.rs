//! Project database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the projects table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectModel {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub customer_id: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
}
