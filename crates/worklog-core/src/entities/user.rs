//! User entity - projection of the account a work log belongs to

use crate::value_objects::AccessLevel;

use super::email_address::EmailAddress;

/// User projection carrying the fields the work-log component needs:
/// identity, company scoping, visibility level, and time-zone offset for
/// parsing submitted timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub access_level: AccessLevel,
    /// Offset from UTC in minutes, used when interpreting local timestamps
    pub utc_offset_minutes: i32,
}

impl User {
    /// Synthesize the placeholder identity shown for work logs that carry
    /// only an email address and no user reference.
    pub fn placeholder(address: &EmailAddress, company_id: i64) -> Self {
        Self {
            id: 0,
            name: format!("Unknown User ({})", address.email),
            company_id,
            access_level: AccessLevel::default(),
            utc_offset_minutes: 0,
        }
    }

    /// Whether this is a synthesized placeholder rather than a stored account
    #[inline]
    pub fn is_placeholder(&self) -> bool {
        self.id == 0
    }
}
