//! PostgreSQL implementation of WorkLogRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use worklog_core::entities::{LogType, User, WorkLog};
use worklog_core::traits::{RepoResult, WorkLogRepository};

use crate::models::WorkLogModel;

use super::error::{map_db_error, work_log_not_found};

/// Columns selected for every work log query
const WORK_LOG_COLUMNS: &str = "id, user_id, email_address_id, task_id, project_id, company_id, \
     customer_id, access_level, started_at, duration, paused_duration, body, log_type, comment, \
     exported_at, approved";

/// Same column list qualified with the `wl` alias, for joined queries
const WORK_LOG_COLUMNS_QUALIFIED: &str = "wl.id, wl.user_id, wl.email_address_id, wl.task_id, \
     wl.project_id, wl.company_id, wl.customer_id, wl.access_level, wl.started_at, wl.duration, \
     wl.paused_duration, wl.body, wl.log_type, wl.comment, wl.exported_at, wl.approved";

/// PostgreSQL implementation of WorkLogRepository
#[derive(Clone)]
pub struct PgWorkLogRepository {
    pool: PgPool,
}

impl PgWorkLogRepository {
    /// Create a new PgWorkLogRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn collect(models: Vec<WorkLogModel>) -> RepoResult<Vec<WorkLog>> {
        models.into_iter().map(WorkLog::try_from).collect()
    }
}

#[async_trait]
impl WorkLogRepository for PgWorkLogRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<WorkLog>> {
        let result = sqlx::query_as::<_, WorkLogModel>(&format!(
            "SELECT {WORK_LOG_COLUMNS} FROM work_logs WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(WorkLog::try_from).transpose()
    }

    #[instrument(skip(self, work_log))]
    async fn create(&self, work_log: &WorkLog) -> RepoResult<WorkLog> {
        let id: i64 = sqlx::query_scalar(
            r#"
            INSERT INTO work_logs
                (user_id, email_address_id, task_id, project_id, company_id, customer_id,
                 access_level, started_at, duration, paused_duration, body, log_type, comment,
                 exported_at, approved)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING id
            "#,
        )
        .bind(work_log.user_id)
        .bind(work_log.email_address_id)
        .bind(work_log.task_id)
        .bind(work_log.project_id)
        .bind(work_log.company_id)
        .bind(work_log.customer_id)
        .bind(work_log.access_level.into_inner())
        .bind(work_log.started_at)
        .bind(work_log.duration)
        .bind(work_log.paused_duration)
        .bind(&work_log.body)
        .bind(work_log.log_type.as_i32())
        .bind(work_log.comment)
        .bind(work_log.exported_at)
        .bind(work_log.approved)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(WorkLog {
            id,
            ..work_log.clone()
        })
    }

    #[instrument(skip(self, work_log))]
    async fn update(&self, work_log: &WorkLog) -> RepoResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE work_logs
            SET user_id = $2, email_address_id = $3, customer_id = $4, access_level = $5,
                started_at = $6, duration = $7, paused_duration = $8, body = $9, log_type = $10,
                comment = $11, exported_at = $12, approved = $13
            WHERE id = $1
            "#,
        )
        .bind(work_log.id)
        .bind(work_log.user_id)
        .bind(work_log.email_address_id)
        .bind(work_log.customer_id)
        .bind(work_log.access_level.into_inner())
        .bind(work_log.started_at)
        .bind(work_log.duration)
        .bind(work_log.paused_duration)
        .bind(&work_log.body)
        .bind(work_log.log_type.as_i32())
        .bind(work_log.comment)
        .bind(work_log.exported_at)
        .bind(work_log.approved)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(work_log_not_found(work_log.id));
        }

        Ok(())
    }

    #[instrument(skip(self, body))]
    async fn update_body(&self, id: i64, body: &str) -> RepoResult<()> {
        let result = sqlx::query("UPDATE work_logs SET body = $2 WHERE id = $1")
            .bind(id)
            .bind(body)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(work_log_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: i64) -> RepoResult<()> {
        let result = sqlx::query("DELETE FROM work_logs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(work_log_not_found(id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn total_duration(&self, task_id: i64) -> RepoResult<i64> {
        let total: Option<i64> =
            sqlx::query_scalar("SELECT SUM(duration)::bigint FROM work_logs WHERE task_id = $1")
                .bind(task_id)
                .fetch_one(&self.pool)
                .await
                .map_err(map_db_error)?;

        Ok(total.unwrap_or(0))
    }

    #[instrument(skip(self))]
    async fn comments(&self) -> RepoResult<Vec<WorkLog>> {
        let results = sqlx::query_as::<_, WorkLogModel>(&format!(
            r#"
            SELECT {WORK_LOG_COLUMNS} FROM work_logs
            WHERE comment = TRUE OR log_type = $1
            ORDER BY started_at
            "#
        ))
        .bind(LogType::TaskComment.as_i32())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::collect(results)
    }

    #[instrument(skip(self))]
    async fn on_tasks_owned_by(&self, user_id: i64) -> RepoResult<Vec<WorkLog>> {
        let results = sqlx::query_as::<_, WorkLogModel>(&format!(
            r#"
            SELECT {WORK_LOG_COLUMNS_QUALIFIED} FROM work_logs wl
            INNER JOIN task_users tu ON wl.task_id = tu.task_id
            WHERE tu.user_id = $1
            ORDER BY wl.started_at
            "#
        ))
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::collect(results)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>> {
        let results = sqlx::query_as::<_, WorkLogModel>(&format!(
            r#"
            SELECT {WORK_LOG_COLUMNS_QUALIFIED} FROM work_logs wl
            JOIN projects p ON wl.project_id = p.id
            JOIN project_permissions pp ON pp.project_id = p.id
            WHERE p.completed_at IS NULL
              AND pp.user_id = $1
              AND (pp.can_see_unwatched
                   OR EXISTS (SELECT 1 FROM task_users tu
                              WHERE tu.task_id = wl.task_id AND tu.user_id = $1))
              AND wl.company_id = $2
              AND wl.access_level <= $3
            ORDER BY wl.started_at
            "#
        ))
        .bind(user.id)
        .bind(user.company_id)
        .bind(user.access_level.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::collect(results)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn level_accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>> {
        let results = sqlx::query_as::<_, WorkLogModel>(&format!(
            r#"
            SELECT {WORK_LOG_COLUMNS} FROM work_logs
            WHERE access_level <= $1
            ORDER BY started_at
            "#
        ))
        .bind(user.access_level.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::collect(results)
    }

    #[instrument(skip(self, user), fields(user_id = user.id))]
    async fn all_accessed_by(&self, user: &User) -> RepoResult<Vec<WorkLog>> {
        let results = sqlx::query_as::<_, WorkLogModel>(&format!(
            r#"
            SELECT {WORK_LOG_COLUMNS_QUALIFIED} FROM work_logs wl
            JOIN project_permissions pp ON pp.project_id = wl.project_id
            WHERE pp.user_id = $1
              AND (pp.can_see_unwatched
                   OR EXISTS (SELECT 1 FROM task_users tu
                              WHERE tu.task_id = wl.task_id AND tu.user_id = $1))
              AND wl.access_level <= $2
            ORDER BY wl.started_at
            "#
        ))
        .bind(user.id)
        .bind(user.access_level.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Self::collect(results)
    }
}
