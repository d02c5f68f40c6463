//! Project entity - projection of the project a work log is scoped to

use chrono::{DateTime, Utc};

/// Project projection: the customer fallback for new logs and the
/// completed flag the visibility scopes check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub customer_id: Option<i64>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Project {
    /// Whether the project has been closed out
    #[inline]
    pub fn is_completed(&self) -> bool {
        self.completed_at.is_some()
    }
}
