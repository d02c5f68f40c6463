//! Request DTOs
//!
//! All request DTOs implement `Deserialize` and `Validate` for input validation.

use serde::Deserialize;
use validator::Validate;

/// Submitted parameters for logging work or commenting on a task.
///
/// Both fields are optional; carrying neither means there is nothing to
/// build, which the work-log builder reports as `None` rather than an error.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct LogWorkRequest {
    /// Raw duration string as typed by the user ("2h 30m", "1:30", "45")
    #[validate(length(max = 32, message = "Duration must be at most 32 characters"))]
    pub duration: Option<String>,

    /// Local timestamp the work started at; defaults to now
    pub started_at: Option<String>,

    /// Comment text attached to the entry
    #[validate(length(max = 20000, message = "Comment must be at most 20000 characters"))]
    pub comment: Option<String>,
}

impl LogWorkRequest {
    /// Whether a non-blank duration was submitted
    pub fn has_duration(&self) -> bool {
        self.duration.as_deref().is_some_and(|d| !d.trim().is_empty())
    }

    /// Whether a non-blank comment was submitted
    pub fn has_comment(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}
