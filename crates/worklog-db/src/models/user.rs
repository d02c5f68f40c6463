//! User and email address database models

use sqlx::FromRow;

/// Database model for the users table
#[derive(Debug, Clone, FromRow)]
pub struct UserModel {
    pub id: i64,
    pub name: String,
    pub company_id: i64,
    pub access_level: i32,
    pub utc_offset_minutes: i32,
}

/// Database model for the email_addresses table
#[derive(Debug, Clone, FromRow)]
pub struct EmailAddressModel {
    pub id: i64,
    pub email: String,
    pub display_name: Option<String>,
    pub user_id: Option<i64>,
    pub is_default: bool,
}
