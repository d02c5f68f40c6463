//! EmailDelivery entity - one queued outbound notification per recipient

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Delivery state: queued until the mailer accepts the message, then sent.
/// There are no other states and no retry state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    Queued,
    Sent,
}

impl DeliveryStatus {
    /// String representation used in the database
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Sent => "sent",
        }
    }

    /// Parse a stored status string
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "queued" => Some(Self::Queued),
            "sent" => Some(Self::Sent),
            _ => None,
        }
    }
}

/// One pending or completed email delivery for a work log notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailDelivery {
    pub id: i64,
    pub work_log_id: i64,
    pub email_address_id: i64,
    pub status: DeliveryStatus,
    pub created_at: DateTime<Utc>,
}

impl EmailDelivery {
    /// Create a new delivery in queued state
    pub fn queued(work_log_id: i64, email_address_id: i64) -> Self {
        Self {
            id: 0,
            work_log_id,
            email_address_id,
            status: DeliveryStatus::Queued,
            created_at: Utc::now(),
        }
    }
}
