//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use worklog_core::entities::{EmailAddress, User};
use worklog_core::traits::{RepoResult, UserRepository};

use crate::models::{EmailAddressModel, UserModel};

use super::error::map_db_error;

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            "SELECT id, name, company_id, access_level, utc_offset_minutes FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self))]
    async fn default_email_address(&self, user_id: i64) -> RepoResult<Option<EmailAddress>> {
        let result = sqlx::query_as::<_, EmailAddressModel>(
            r#"
            SELECT id, email, display_name, user_id, is_default
            FROM email_addresses
            WHERE user_id = $1 AND is_default = TRUE
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EmailAddress::from))
    }

    #[instrument(skip(self))]
    async fn find_email_address(&self, id: i64) -> RepoResult<Option<EmailAddress>> {
        let result = sqlx::query_as::<_, EmailAddressModel>(
            "SELECT id, email, display_name, user_id, is_default FROM email_addresses WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EmailAddress::from))
    }
}
