//! # worklog-mail
//!
//! SMTP implementation of the `worklog-core` mailer port via `lettre`.
//! Provides the two notification templates ("changed", "created") the
//! work-log component sends.

mod smtp;

pub use smtp::{MailError, SmtpMailer};
