//! PostgreSQL implementation of EventLogRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::instrument;

use worklog_core::entities::EventLog;
use worklog_core::traits::{EventLogRepository, RepoResult};

use crate::models::EventLogModel;

use super::error::{event_log_not_found, map_db_error};

/// PostgreSQL implementation of EventLogRepository
#[derive(Clone)]
pub struct PgEventLogRepository {
    pool: PgPool,
}

impl PgEventLogRepository {
    /// Create a new PgEventLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EventLogRepository for PgEventLogRepository {
    #[instrument(skip(self, event_log))]
    async fn create(&self, event_log: &EventLog) -> RepoResult<EventLog> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO event_logs (work_log_id, company_id, project_id, user_id, event_type, created_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id
            "#,
        )
        .bind(event_log.work_log_id)
        .bind(event_log.company_id)
        .bind(event_log.project_id)
        .bind(event_log.user_id)
        .bind(event_log.event_type.as_i32())
        .bind(event_log.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(EventLog {
            id,
            ..event_log.clone()
        })
    }

    #[instrument(skip(self))]
    async fn find_by_work_log(&self, work_log_id: i64) -> RepoResult<Option<EventLog>> {
        let result = sqlx::query_as::<_, EventLogModel>(
            r#"
            SELECT id, work_log_id, company_id, project_id, user_id, event_type, created_at
            FROM event_logs
            WHERE work_log_id = $1
            "#,
        )
        .bind(work_log_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(EventLog::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn sync_created_at(&self, work_log_id: i64, created_at: DateTime<Utc>) -> RepoResult<()> {
        let result = sqlx::query("UPDATE event_logs SET created_at = $2 WHERE work_log_id = $1")
            .bind(work_log_id)
            .bind(created_at)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(event_log_not_found(work_log_id));
        }

        Ok(())
    }
}
