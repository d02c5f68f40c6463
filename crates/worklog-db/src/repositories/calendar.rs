//! PostgreSQL implementation of CalendarEntryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use worklog_core::traits::{CalendarEntryRepository, RepoResult};

use super::error::map_db_error;

/// PostgreSQL implementation of CalendarEntryRepository
#[derive(Clone)]
pub struct PgCalendarEntryRepository {
    pool: PgPool,
}

impl PgCalendarEntryRepository {
    /// Create a new PgCalendarEntryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CalendarEntryRepository for PgCalendarEntryRepository {
    #[instrument(skip(self))]
    async fn delete_for_work_log(&self, work_log_id: i64) -> RepoResult<()> {
        // No entry is not an error; a work log has zero or one
        sqlx::query("DELETE FROM calendar_entries WHERE work_log_id = $1")
            .bind(work_log_id)
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(())
    }
}
