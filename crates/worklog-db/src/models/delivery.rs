//! Email delivery database model

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for the email_deliveries table
#[derive(Debug, Clone, FromRow)]
pub struct EmailDeliveryModel {
    pub id: i64,
    pub work_log_id: i64,
    pub email_address_id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl EmailDeliveryModel {
    /// Check if the delivery is still waiting to be sent
    #[inline]
    pub fn is_queued(&self) -> bool {
        self.status == "queued"
    }
}
