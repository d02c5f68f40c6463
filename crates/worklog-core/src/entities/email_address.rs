//! EmailAddress entity - a mail endpoint, optionally owned by a user

/// An email address known to the system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailAddress {
    pub id: i64,
    pub email: String,
    /// Display name of the owner, when known
    pub display_name: Option<String>,
    /// Owning user, when the address is attached to an account
    pub user_id: Option<i64>,
    /// Whether this is the owner's default address
    pub is_default: bool,
}

impl EmailAddress {
    /// Render as `Name <addr>` when a display name is known, else the bare address
    pub fn username_and_email(&self) -> String {
        match &self.display_name {
            Some(name) if !name.trim().is_empty() => format!("{name} <{}>", self.email),
            _ => self.email.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(display_name: Option<&str>) -> EmailAddress {
        EmailAddress {
            id: 1,
            email: "alice@example.com".to_string(),
            display_name: display_name.map(String::from),
            user_id: None,
            is_default: true,
        }
    }

    #[test]
    fn test_username_and_email() {
        assert_eq!(address(Some("Alice")).username_and_email(), "Alice <alice@example.com>");
        assert_eq!(address(None).username_and_email(), "alice@example.com");
        assert_eq!(address(Some("  ")).username_and_email(), "alice@example.com");
    }
}
