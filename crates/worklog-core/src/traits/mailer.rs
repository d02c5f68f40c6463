//! Mailer port - the two notification templates the component sends

use async_trait::async_trait;

use crate::entities::{Task, User};
use crate::error::DomainError;

/// What kind of change a "changed" notification announces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UpdateKind {
    #[default]
    Comment,
    Status,
    Assignment,
}

impl UpdateKind {
    /// Human-readable label used in mail subjects
    pub const fn label(self) -> &'static str {
        match self {
            Self::Comment => "comment",
            Self::Status => "status",
            Self::Assignment => "assignment",
        }
    }
}

/// A file forwarded along with a notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailAttachment {
    pub filename: String,
    pub content_type: String,
    pub content: Vec<u8>,
}

/// Outbound mail templates. One call sends to one recipient address.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// "Task changed" notification carrying the composed comment body
    async fn changed(
        &self,
        update_kind: UpdateKind,
        task: &Task,
        author: &User,
        recipient: &str,
        body: &str,
        attachments: &[MailAttachment],
    ) -> Result<(), DomainError>;

    /// "Task created" notification; no body, any comment goes out separately
    async fn created(
        &self,
        task: &Task,
        author: &User,
        recipient: &str,
        attachments: &[MailAttachment],
    ) -> Result<(), DomainError>;
}
