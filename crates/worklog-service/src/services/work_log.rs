//! Work log service - construction paths and persistence lifecycle
//!
//! Construction mirrors the two ways entries come into existence: the
//! automatic task-created entry, and user-submitted work/comment entries.
//! The create/update/destroy methods run the paired side effects (audit
//! entry, calendar cleanup, worked-minutes recalculation) after each write.

use chrono::Utc;
use tracing::instrument;
use validator::Validate;

use worklog_core::{EventLog, LogType, Task, User, WorkLog};

use crate::dto::LogWorkRequest;
use crate::services::{ServiceContext, ServiceError, ServiceResult};

/// Resolve the author identity a work log displays: the referenced user, or
/// a placeholder synthesized from the originating email address.
pub(crate) async fn resolve_author(
    ctx: &ServiceContext,
    work_log: &WorkLog,
) -> ServiceResult<User> {
    if let Some(user_id) = work_log.user_id {
        return match ctx.user_repo().find_by_id(user_id).await? {
            Some(user) => Ok(user),
            None => Err(ServiceError::not_found("User", user_id.to_string())),
        };
    }
    if let Some(address_id) = work_log.email_address_id {
        return match ctx.user_repo().find_email_address(address_id).await? {
            Some(address) => Ok(User::placeholder(&address, work_log.company_id)),
            None => Err(ServiceError::not_found("Email address", address_id.to_string())),
        };
    }
    Err(ServiceError::internal(format!(
        "work log {} has neither user nor email address",
        work_log.id
    )))
}

/// Work log service
pub struct WorkLogService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WorkLogService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Find a work log by ID
    pub async fn find(&self, id: i64) -> ServiceResult<WorkLog> {
        match self.ctx.work_log_repo().find_by_id(id).await? {
            Some(log) => Ok(log),
            None => Err(ServiceError::not_found("Work log", id.to_string())),
        }
    }

    /// The author identity the work log displays
    pub async fn author_of(&self, work_log: &WorkLog) -> ServiceResult<User> {
        resolve_author(self.ctx, work_log).await
    }

    /// Record the automatic "task created" entry for a freshly created task,
    /// carrying the task description as its body.
    #[instrument(skip(self, task, creator), fields(task_id = task.id, user_id = creator.id))]
    pub async fn create_for_new_task(
        &self,
        task: &Task,
        creator: &User,
    ) -> ServiceResult<WorkLog> {
        let customer_id = self.customer_for_task(task).await?;
        let mut log = WorkLog::for_task(task.id, task.project_id, task.company_id, customer_id);
        log.user_id = Some(creator.id);
        log.log_type = LogType::TaskCreated;
        log.body = task.description.clone();
        self.create(&log).await
    }

    /// Build an unsaved work-added or comment entry from submitted input.
    ///
    /// Returns `Ok(None)` when the request carries neither a duration nor a
    /// comment, meaning there is nothing to record.
    #[instrument(skip(self, task, user, request), fields(task_id = task.id, user_id = user.id))]
    pub async fn build_work_added_or_comment(
        &self,
        task: &Task,
        user: &User,
        request: &LogWorkRequest,
    ) -> ServiceResult<Option<WorkLog>> {
        request
            .validate()
            .map_err(|e| ServiceError::validation(e.to_string()))?;

        if !request.has_duration() && !request.has_comment() {
            return Ok(None);
        }

        let customer_id = self.customer_for_task(task).await?;
        let mut log = WorkLog::for_task(task.id, task.project_id, task.company_id, customer_id);
        log.user_id = Some(user.id);

        if request.has_comment() {
            log.log_type = LogType::TaskComment;
            log.comment = true;
            if let Some(comment) = request.comment.as_deref() {
                log.body = comment.trim().to_string();
            }
        }

        if request.has_duration() {
            // Logged time takes precedence over the comment marker for the
            // entry's type; the comment flag stays set
            log.log_type = LogType::WorkAdded;
            let raw = request.duration.as_deref().unwrap_or_default();
            log.duration = self
                .ctx
                .time_parser()
                .parse_duration(user, raw)
                .ok_or_else(|| {
                    ServiceError::validation(format!("unparseable duration: {raw:?}"))
                })?;
            log.started_at = self
                .ctx
                .time_parser()
                .parse_started_at(user, request.started_at.as_deref());
        } else {
            log.duration = 0;
            log.started_at = Utc::now();
        }

        Ok(Some(log))
    }

    /// Persist a new work log and run its creation side effects: the paired
    /// audit entry, and the worked-minutes recalculation when time was logged.
    #[instrument(skip(self, work_log), fields(task_id = work_log.task_id))]
    pub async fn create(&self, work_log: &WorkLog) -> ServiceResult<WorkLog> {
        work_log.validate(self.ctx.attribute_validator())?;

        let created = self.ctx.work_log_repo().create(work_log).await?;
        self.ctx
            .event_log_repo()
            .create(&EventLog::for_work_log(&created))
            .await?;
        if created.has_duration() {
            let minutes = self
                .ctx
                .task_repo()
                .recalculate_worked_minutes(created.task_id)
                .await?;
            tracing::debug!(task_id = created.task_id, minutes, "worked minutes recalculated");
        }
        Ok(created)
    }

    /// Persist changes to a work log and run its update side effects: the
    /// exported calendar entry is invalidated, the audit entry is re-synced
    /// to the (possibly moved) start time, and worked minutes recalculated
    /// when time is logged.
    #[instrument(skip(self, work_log), fields(work_log_id = work_log.id))]
    pub async fn update(&self, work_log: &WorkLog) -> ServiceResult<()> {
        work_log.validate(self.ctx.attribute_validator())?;

        self.ctx.work_log_repo().update(work_log).await?;
        self.ctx
            .calendar_repo()
            .delete_for_work_log(work_log.id)
            .await?;
        self.ctx
            .event_log_repo()
            .sync_created_at(work_log.id, work_log.started_at)
            .await?;
        if work_log.has_duration() {
            self.ctx
                .task_repo()
                .recalculate_worked_minutes(work_log.task_id)
                .await?;
        }
        Ok(())
    }

    /// Delete a work log. The audit entry, calendar entry, and deliveries go
    /// with it; the task's worked minutes are recalculated with the entry now
    /// excluded.
    #[instrument(skip(self))]
    pub async fn destroy(&self, id: i64) -> ServiceResult<()> {
        let log = self.find(id).await?;
        self.ctx.work_log_repo().delete(id).await?;
        self.ctx
            .task_repo()
            .recalculate_worked_minutes(log.task_id)
            .await?;
        Ok(())
    }

    /// Customer context for a new entry: the task's first attached customer,
    /// falling back to the project's customer.
    async fn customer_for_task(&self, task: &Task) -> ServiceResult<Option<i64>> {
        let customers = self.ctx.task_repo().customer_ids(task.id).await?;
        if let Some(first) = customers.first() {
            return Ok(Some(*first));
        }
        let project = self.ctx.project_repo().find_by_id(task.project_id).await?;
        Ok(project.and_then(|p| p.customer_id))
    }
}
