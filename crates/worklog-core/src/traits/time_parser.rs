//! Time parser port - turns user-entered duration and timestamp strings
//! into seconds and UTC instants

use chrono::{DateTime, Utc};

use crate::entities::User;

/// Parses raw duration/date input in the context of a user (time-zone
/// offset, formatting habits).
pub trait TimeParser: Send + Sync {
    /// Parse a duration string (`"2h 30m"`, `"1:30"`, `"45"`) into seconds.
    /// Returns `None` when the input is not a recognizable duration.
    fn parse_duration(&self, user: &User, raw: &str) -> Option<i64>;

    /// Interpret a submitted local timestamp with the user's UTC offset,
    /// falling back to the current time when absent or unparseable.
    fn parse_started_at(&self, user: &User, raw: Option<&str>) -> DateTime<Utc>;
}
