//! PostgreSQL implementation of EmailDeliveryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use worklog_core::entities::{EmailAddress, EmailDelivery};
use worklog_core::traits::{EmailDeliveryRepository, RepoResult};

use crate::models::{EmailAddressModel, EmailDeliveryModel};

use super::error::{delivery_not_found, map_db_error};

/// PostgreSQL implementation of EmailDeliveryRepository
#[derive(Clone)]
pub struct PgEmailDeliveryRepository {
    pool: PgPool,
}

impl PgEmailDeliveryRepository {
    /// Create a new PgEmailDeliveryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EmailDeliveryRepository for PgEmailDeliveryRepository {
    #[instrument(skip(self, delivery))]
    async fn create(&self, delivery: &EmailDelivery) -> RepoResult<EmailDelivery> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO email_deliveries (work_log_id, email_address_id, status, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(delivery.work_log_id)
        .bind(delivery.email_address_id)
        .bind(delivery.status.as_str())
        .bind(delivery.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EmailDelivery {
            id,
            ..delivery.clone()
        })
    }

    #[instrument(skip(self))]
    async fn find_queued(&self, work_log_id: i64) -> RepoResult<Vec<EmailDelivery>> {
        let results = sqlx::query_as::<_, EmailDeliveryModel>(
            r#"
            SELECT id, work_log_id, email_address_id, status, created_at
            FROM email_deliveries
            WHERE work_log_id = $1 AND status = 'queued'
            ORDER BY id
            "#,
        )
        .bind(work_log_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(EmailDelivery::try_from).collect()
    }

    #[instrument(skip(self))]
    async fn mark_sent(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("UPDATE email_deliveries SET status = 'sent' WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(delivery_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn email_address(&self, delivery_id: i64) -> RepoResult<Option<EmailAddress>> {
        let result = sqlx::query_as::<_, EmailAddressModel>(
            r#"
            SELECT ea.id, ea.email, ea.display_name, ea.user_id, ea.is_default
            FROM email_addresses ea
            JOIN email_deliveries ed ON ed.email_address_id = ea.id
            WHERE ed.id = $1
            "#,
        )
        .bind(delivery_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(EmailAddress::from))
    }
}
