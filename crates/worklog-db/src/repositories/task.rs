//! PostgreSQL implementation of TaskRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, instrument};

use worklog_core::entities::{EmailAddress, Task, User};
use worklog_core::traits::{RepoResult, TaskRepository};

use crate::models::{EmailAddressModel, TaskModel, UserModel};

use super::error::{map_db_error, task_not_found};

/// PostgreSQL implementation of TaskRepository
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    /// Create a new PgTaskRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Task>> {
        let result = sqlx::query_as::<_, TaskModel>(
            "SELECT id, name, project_id, company_id, description, worked_minutes FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Task::from))
    }

    #[instrument(skip(self))]
    async fn customer_ids(&self, task_id: i64) -> RepoResult<Vec<i64>> {
        let ids = sqlx::query_scalar(
            "SELECT customer_id FROM task_customers WHERE task_id = $1 ORDER BY id",
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(ids)
    }

    #[instrument(skip(self))]
    async fn email_addresses(&self, task_id: i64) -> RepoResult<Vec<EmailAddress>> {
        let results = sqlx::query_as::<_, EmailAddressModel>(
            r#"
            SELECT ea.id, ea.email, ea.display_name, ea.user_id, ea.is_default
            FROM email_addresses ea
            JOIN task_email_addresses tea ON tea.email_address_id = ea.id
            WHERE tea.task_id = $1
            ORDER BY ea.id
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(EmailAddress::from).collect())
    }

    #[instrument(skip(self))]
    async fn assigned_users(&self, task_id: i64) -> RepoResult<Vec<User>> {
        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT u.id, u.name, u.company_id, u.access_level, u.utc_offset_minutes
            FROM users u
            JOIN task_users tu ON tu.user_id = u.id
            WHERE tu.task_id = $1
            ORDER BY u.id
            "#,
        )
        .bind(task_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn users_to_notify(
        &self,
        task_id: i64,
        acting_user_id: Option<i64>,
    ) -> RepoResult<Vec<User>> {
        // Assigned users plus watchers, minus the actor
        let results = sqlx::query_as::<_, UserModel>(
            r#"
            SELECT DISTINCT u.id, u.name, u.company_id, u.access_level, u.utc_offset_minutes
            FROM users u
            WHERE u.id IN (
                SELECT user_id FROM task_users WHERE task_id = $1
                UNION
                SELECT user_id FROM task_watchers WHERE task_id = $1
            )
            AND ($2::bigint IS NULL OR u.id <> $2)
            ORDER BY u.id
            "#,
        )
        .bind(task_id)
        .bind(acting_user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    #[instrument(skip(self))]
    async fn recalculate_worked_minutes(&self, task_id: i64) -> RepoResult<i64> {
        let worked_minutes: Option<i64> = sqlx::query_scalar(
            r#"
            UPDATE tasks
            SET worked_minutes = COALESCE(
                (SELECT SUM(duration) FROM work_logs WHERE task_id = $1), 0) / 60
            WHERE id = $1
            RETURNING worked_minutes
            "#,
        )
        .bind(task_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let worked_minutes = worked_minutes.ok_or_else(|| task_not_found(task_id))?;
        info!(task_id, worked_minutes, "Recalculated worked minutes");
        Ok(worked_minutes)
    }

    #[instrument(skip(self, excluded_user_ids))]
    async fn mark_unread(&self, task_id: i64, excluded_user_ids: &[i64]) -> RepoResult<()> {
        sqlx::query(
            r#"
            UPDATE task_users
            SET unread = TRUE
            WHERE task_id = $1 AND user_id <> ALL($2)
            "#,
        )
        .bind(task_id)
        .bind(excluded_user_ids)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
