//! User and EmailAddress entity <-> model mappers

use worklog_core::entities::{EmailAddress, User};
use worklog_core::value_objects::AccessLevel;

use crate::models::{EmailAddressModel, UserModel};

/// Convert UserModel to User entity
impl From<UserModel> for User {
    fn from(model: UserModel) -> Self {
        User {
            id: model.id,
            name: model.name,
            company_id: model.company_id,
            access_level: AccessLevel::new(model.access_level),
            utc_offset_minutes: model.utc_offset_minutes,
        }
    }
}

/// Convert EmailAddressModel to EmailAddress entity
impl From<EmailAddressModel> for EmailAddress {
    fn from(model: EmailAddressModel) -> Self {
        EmailAddress {
            id: model.id,
            email: model.email,
            display_name: model.display_name,
            user_id: model.user_id,
            is_default: model.is_default,
        }
    }
}
