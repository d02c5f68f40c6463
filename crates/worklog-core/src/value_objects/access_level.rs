//! Access level - per-record visibility threshold
//!
//! Every work log carries an access level; a user may see the record only
//! when the record's level is less than or equal to the user's own level.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ordered visibility threshold stored as a small integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccessLevel(i32);

impl AccessLevel {
    /// The lowest level, visible to every user
    pub const PUBLIC: AccessLevel = AccessLevel(1);

    /// Create an AccessLevel from a raw i32 value
    #[inline]
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    /// Get the inner i32 value
    #[inline]
    pub const fn into_inner(self) -> i32 {
        self.0
    }

    /// Check whether a viewer at `viewer_level` may see a record at this level
    #[inline]
    pub fn visible_to(self, viewer_level: AccessLevel) -> bool {
        self <= viewer_level
    }
}

impl Default for AccessLevel {
    fn default() -> Self {
        Self::PUBLIC
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i32> for AccessLevel {
    fn from(level: i32) -> Self {
        Self(level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ordering() {
        assert!(AccessLevel::new(1) < AccessLevel::new(2));
        assert_eq!(AccessLevel::default(), AccessLevel::PUBLIC);
    }

    #[test]
    fn test_visible_to() {
        let restricted = AccessLevel::new(2);
        assert!(restricted.visible_to(AccessLevel::new(2)));
        assert!(restricted.visible_to(AccessLevel::new(3)));
        assert!(!restricted.visible_to(AccessLevel::new(1)));
    }
}
