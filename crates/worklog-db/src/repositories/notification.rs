//! PostgreSQL implementation of WorkLogNotificationRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use worklog_core::traits::{RepoResult, WorkLogNotificationRepository};

use super::error::map_db_error;

/// PostgreSQL implementation of WorkLogNotificationRepository
#[derive(Clone)]
pub struct PgWorkLogNotificationRepository {
    pool: PgPool,
}

impl PgWorkLogNotificationRepository {
    /// Create a new PgWorkLogNotificationRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl WorkLogNotificationRepository for PgWorkLogNotificationRepository {
    #[instrument(skip(self, user_ids))]
    async fn replace(&self, work_log_id: i64, user_ids: &[i64]) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query("DELETE FROM work_log_notifications WHERE work_log_id = $1")
            .bind(work_log_id)
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(
            r#"
            INSERT INTO work_log_notifications (work_log_id, user_id)
            SELECT $1, user_id FROM UNNEST($2::bigint[]) AS t(user_id)
            "#,
        )
        .bind(work_log_id)
        .bind(user_ids)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn notified_user_ids(&self, work_log_id: i64) -> RepoResult<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT user_id FROM work_log_notifications WHERE work_log_id = $1 ORDER BY user_id",
        )
        .bind(work_log_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids)
    }
}
