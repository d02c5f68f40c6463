//! WorkLog entity - a work entry or comment logged against a task
//!
//! Has a duration in seconds for work entries.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::traits::CustomAttributeValidator;
use crate::value_objects::AccessLevel;

/// Kind of event a work log records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogType {
    TaskCreated,
    TaskCompleted,
    TaskReverted,
    TaskModified,
    WorkAdded,
    TaskComment,
}

impl LogType {
    /// Stable integer representation used in the database
    #[inline]
    pub const fn as_i32(self) -> i32 {
        match self {
            Self::TaskCreated => 1,
            Self::TaskCompleted => 2,
            Self::TaskReverted => 3,
            Self::TaskModified => 4,
            Self::WorkAdded => 5,
            Self::TaskComment => 6,
        }
    }

    /// Convert a stored integer back to a LogType
    pub const fn from_i32(value: i32) -> Option<Self> {
        match value {
            1 => Some(Self::TaskCreated),
            2 => Some(Self::TaskCompleted),
            3 => Some(Self::TaskReverted),
            4 => Some(Self::TaskModified),
            5 => Some(Self::WorkAdded),
            6 => Some(Self::TaskComment),
            _ => None,
        }
    }
}

/// Marker the body trailer starts with after notification delivery
const TRAILER_PREFIX: &str = "Notification emails sent to";

/// WorkLog entity
#[derive(Debug, Clone, PartialEq)]
pub struct WorkLog {
    pub id: i64,
    /// Author; absent when the entry originated from a bare email address
    pub user_id: Option<i64>,
    /// Originating email address when there is no author user
    pub email_address_id: Option<i64>,
    pub task_id: i64,
    pub project_id: i64,
    pub company_id: i64,
    pub customer_id: Option<i64>,
    pub access_level: AccessLevel,
    pub started_at: DateTime<Utc>,
    /// Logged work in seconds
    pub duration: i64,
    /// Time paused during the logged work, in seconds
    pub paused_duration: i64,
    pub body: String,
    pub log_type: LogType,
    pub comment: bool,
    pub exported_at: Option<DateTime<Utc>>,
    /// Tri-state approval: unreviewed / approved / rejected
    pub approved: Option<bool>,
}

impl WorkLog {
    /// Create a minimal work log for a task, stamped with the task's
    /// project/company/customer context
    pub fn for_task(task_id: i64, project_id: i64, company_id: i64, customer_id: Option<i64>) -> Self {
        Self {
            id: 0,
            user_id: None,
            email_address_id: None,
            task_id,
            project_id,
            company_id,
            customer_id,
            access_level: AccessLevel::default(),
            started_at: Utc::now(),
            duration: 0,
            paused_duration: 0,
            body: String::new(),
            log_type: LogType::TaskModified,
            comment: false,
            exported_at: None,
            approved: None,
        }
    }

    /// When the logged work ended
    #[inline]
    pub fn ended_at(&self) -> DateTime<Utc> {
        self.started_at + Duration::seconds(self.duration + self.paused_duration)
    }

    /// Whether this entry behaves as a comment
    #[inline]
    pub fn is_comment(&self) -> bool {
        self.comment || self.log_type == LogType::TaskComment
    }

    /// Whether this entry carries billable work time
    #[inline]
    pub fn has_duration(&self) -> bool {
        self.duration > 0
    }

    /// Run persistence validation.
    ///
    /// The start timestamp is present by construction; what remains is a
    /// sane duration and, for work-added entries, the company's custom
    /// attribute rules.
    pub fn validate(&self, attributes: &dyn CustomAttributeValidator) -> Result<(), DomainError> {
        if self.duration < 0 {
            return Err(DomainError::NegativeDuration(self.duration));
        }
        if self.log_type == LogType::WorkAdded {
            attributes.validate(self)?;
        }
        Ok(())
    }

    /// Append a "notification sent" trailer for a delivered address.
    ///
    /// The first delivered address opens a trailer block separated from the
    /// existing body; subsequent addresses are appended as comma-separated
    /// continuations of the same block.
    pub fn append_delivery_trailer(&mut self, address: &str) {
        if self.body.trim().is_empty() || !self.body.contains(TRAILER_PREFIX) {
            if !self.body.trim().is_empty() {
                self.body.push_str("\n\n");
            }
            self.body.push_str(TRAILER_PREFIX);
            self.body.push(' ');
            self.body.push_str(address);
        } else {
            self.body.push_str(", ");
            self.body.push_str(address);
        }
    }
}
