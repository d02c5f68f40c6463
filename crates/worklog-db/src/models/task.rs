//! Task database model

use sqlx::FromRow;

/// Database model for the tasks table
#[derive(Debug, Clone, FromRow)]
pub struct TaskModel {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    pub company_id: i64,
    pub description: String,
    pub worked_minutes: i64,
}
