//! SMTP notification delivery.
//!
//! [`SmtpMailer`] wraps the `lettre` async SMTP transport and renders the
//! two plain-text notification templates. One call sends to one recipient;
//! the notification fan-out drives the per-recipient loop.

use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Attachment, MultiPart, SinglePart},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use tracing::info;

use worklog_common::SmtpConfig;
use worklog_core::entities::{Task, User};
use worklog_core::error::DomainError;
use worklog_core::traits::{MailAttachment, Mailer, UpdateKind};

/// Error type for mail delivery failures
#[derive(Debug, thiserror::Error)]
pub enum MailError {
    /// SMTP transport-level failure (authentication, connection, etc.)
    #[error("SMTP transport error: {0}")]
    Transport(#[from] lettre::transport::smtp::Error),

    /// The recipient or sender address could not be parsed
    #[error("Email address parse error: {0}")]
    Address(#[from] lettre::address::AddressError),

    /// The MIME message could not be assembled
    #[error("Email build error: {0}")]
    Build(String),
}

impl From<MailError> for DomainError {
    fn from(e: MailError) -> Self {
        DomainError::MailerError(e.to_string())
    }
}

/// Sends work-log notifications via SMTP
pub struct SmtpMailer {
    config: SmtpConfig,
    transport: AsyncSmtpTransport<Tokio1Executor>,
}

impl SmtpMailer {
    /// Create a mailer from SMTP settings, connecting with STARTTLS
    pub fn new(config: SmtpConfig) -> Result<Self, MailError> {
        let mut builder =
            AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.host)?.port(config.port);

        if let (Some(user), Some(pass)) = (&config.username, &config.password) {
            builder = builder.credentials(Credentials::new(user.clone(), pass.clone()));
        }

        Ok(Self {
            transport: builder.build(),
            config,
        })
    }

    async fn send(
        &self,
        recipient: &str,
        subject: String,
        body: String,
        attachments: &[MailAttachment],
    ) -> Result<(), MailError> {
        let builder = Message::builder()
            .from(self.config.from_address.parse()?)
            .to(recipient.parse()?)
            .subject(subject);

        let email = if attachments.is_empty() {
            builder
                .header(ContentType::TEXT_PLAIN)
                .body(body)
                .map_err(|e| MailError::Build(e.to_string()))?
        } else {
            let mut multipart = MultiPart::mixed().singlepart(SinglePart::plain(body));
            for attachment in attachments {
                let content_type = ContentType::parse(&attachment.content_type)
                    .map_err(|e| MailError::Build(e.to_string()))?;
                multipart = multipart.singlepart(
                    Attachment::new(attachment.filename.clone())
                        .body(attachment.content.clone(), content_type),
                );
            }
            builder
                .multipart(multipart)
                .map_err(|e| MailError::Build(e.to_string()))?
        };

        self.transport.send(email).await?;
        info!(to = recipient, "Notification email sent");
        Ok(())
    }
}

#[async_trait]
impl Mailer for SmtpMailer {
    async fn changed(
        &self,
        update_kind: UpdateKind,
        task: &Task,
        author: &User,
        recipient: &str,
        body: &str,
        attachments: &[MailAttachment],
    ) -> Result<(), DomainError> {
        let subject = format!("[{}] {} by {}", task.name, update_kind.label(), author.name);
        self.send(recipient, subject, body.to_string(), attachments)
            .await
            .map_err(DomainError::from)
    }

    async fn created(
        &self,
        task: &Task,
        author: &User,
        recipient: &str,
        attachments: &[MailAttachment],
    ) -> Result<(), DomainError> {
        let subject = format!("[{}] created by {}", task.name, author.name);
        let body = format!("{}\n\n{}", task.name, task.description);
        self.send(recipient, subject, body, attachments)
            .await
            .map_err(DomainError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mail_error_display() {
        let err = MailError::Build("missing body".to_string());
        assert_eq!(err.to_string(), "Email build error: missing body");
    }

    #[test]
    fn test_mail_error_into_domain_error() {
        let err: DomainError = MailError::Build("bad part".to_string()).into();
        assert!(matches!(err, DomainError::MailerError(_)));
    }
}
