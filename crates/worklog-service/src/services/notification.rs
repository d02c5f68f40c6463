//! Notification service - fan-out of work log notifications
//!
//! Fan-out runs in two stages. `notify` synchronously flags the task unread,
//! records the notified users, and queues one delivery per recipient
//! address. Dispatch then drains the queue through the mailer, inline in
//! development and on a background task in production.

use std::collections::HashSet;

use tracing::instrument;
use worklog_core::{EmailAddress, EmailDelivery, LogType, MailAttachment, UpdateKind, WorkLog};

use crate::services::work_log::resolve_author;
use crate::services::{ServiceContext, ServiceError, ServiceResult};

/// Notification service. Owns its context so dispatch can move onto a
/// background task.
#[derive(Clone)]
pub struct NotificationService {
    ctx: ServiceContext,
}

impl NotificationService {
    pub fn new(ctx: ServiceContext) -> Self {
        Self { ctx }
    }

    /// Fan a work log's notification out to everyone watching its task.
    ///
    /// Flags the task unread for recipients, records which users were
    /// notified, queues one delivery per distinct address, and dispatches
    /// the queue.
    #[instrument(skip(self, attachments), fields(update_kind = update_kind.label()))]
    pub async fn notify(
        &self,
        work_log_id: i64,
        update_kind: UpdateKind,
        attachments: Vec<MailAttachment>,
    ) -> ServiceResult<()> {
        let log = self.find_work_log(work_log_id).await?;

        self.mark_task_unread(&log).await?;

        let (user_ids, addresses) = self.recipients(&log).await?;
        self.ctx
            .notification_repo()
            .replace(log.id, &user_ids)
            .await?;

        for address in &addresses {
            self.ctx
                .delivery_repo()
                .create(&EmailDelivery::queued(log.id, address.id))
                .await?;
        }
        tracing::info!(
            work_log_id = log.id,
            recipients = addresses.len(),
            "notification deliveries queued"
        );

        if self.ctx.environment().is_production() {
            let service = self.clone();
            tokio::spawn(async move {
                if let Err(error) = service
                    .send_notifications(work_log_id, update_kind, &attachments)
                    .await
                {
                    tracing::error!(work_log_id, %error, "notification dispatch failed");
                }
            });
            Ok(())
        } else {
            self.send_notifications(work_log_id, update_kind, &attachments)
                .await
        }
    }

    /// Drain the queued deliveries for a work log through the mailer.
    ///
    /// Template choice follows the entry: comments go out as "task changed"
    /// mail carrying the comment body, task-created entries as "task
    /// created" mail, and anything else sends nothing. After each accepted
    /// delivery the recipient is appended to the entry's body trailer.
    #[instrument(skip(self, attachments))]
    pub async fn send_notifications(
        &self,
        work_log_id: i64,
        update_kind: UpdateKind,
        attachments: &[MailAttachment],
    ) -> ServiceResult<()> {
        let mut log = self.find_work_log(work_log_id).await?;

        let sends_changed =
            (log.comment && log.log_type != LogType::TaskCreated) || log.log_type == LogType::TaskComment;
        let sends_created = log.log_type == LogType::TaskCreated;
        if !sends_changed && !sends_created {
            return Ok(());
        }

        let task = match self.ctx.task_repo().find_by_id(log.task_id).await? {
            Some(task) => task,
            None => return Err(ServiceError::not_found("Task", log.task_id.to_string())),
        };
        let author = resolve_author(&self.ctx, &log).await?;

        for delivery in self.ctx.delivery_repo().find_queued(log.id).await? {
            let Some(address) = self.ctx.delivery_repo().email_address(delivery.id).await? else {
                tracing::warn!(delivery_id = delivery.id, "queued delivery lost its address");
                continue;
            };

            if sends_changed {
                let body = format!("{}:\n{}", author.name, log.body);
                self.ctx
                    .mailer()
                    .changed(update_kind, &task, &author, &address.email, &body, attachments)
                    .await?;
            } else {
                self.ctx
                    .mailer()
                    .created(&task, &author, &address.email, attachments)
                    .await?;
            }

            self.ctx.delivery_repo().mark_sent(delivery.id).await?;
            log.append_delivery_trailer(&address.username_and_email());
            self.ctx
                .work_log_repo()
                .update_body(log.id, &log.body)
                .await?;
        }

        Ok(())
    }

    async fn find_work_log(&self, id: i64) -> ServiceResult<WorkLog> {
        match self.ctx.work_log_repo().find_by_id(id).await? {
            Some(log) => Ok(log),
            None => Err(ServiceError::not_found("Work log", id.to_string())),
        }
    }

    /// Flag the task unread, skipping the entry's author and every assignee
    /// whose level does not clear the entry's threshold.
    async fn mark_task_unread(&self, log: &WorkLog) -> ServiceResult<()> {
        let mut excluded: Vec<i64> = self
            .ctx
            .task_repo()
            .assigned_users(log.task_id)
            .await?
            .into_iter()
            .filter(|user| !log.access_level.visible_to(user.access_level))
            .map(|user| user.id)
            .collect();
        if let Some(author_id) = log.user_id {
            excluded.push(author_id);
        }
        self.ctx
            .task_repo()
            .mark_unread(log.task_id, &excluded)
            .await?;
        Ok(())
    }

    /// Collect recipients: addresses registered directly on the task, plus
    /// the default address of every watcher who clears the entry's access
    /// level, with duplicate addresses dropped.
    async fn recipients(&self, log: &WorkLog) -> ServiceResult<(Vec<i64>, Vec<EmailAddress>)> {
        let mut addresses = self.ctx.task_repo().email_addresses(log.task_id).await?;

        let mut user_ids = Vec::new();
        for user in self
            .ctx
            .task_repo()
            .users_to_notify(log.task_id, log.user_id)
            .await?
        {
            if !log.access_level.visible_to(user.access_level) {
                continue;
            }
            user_ids.push(user.id);
            if let Some(address) = self.ctx.user_repo().default_email_address(user.id).await? {
                addresses.push(address);
            }
        }

        let mut seen = HashSet::new();
        addresses.retain(|address| seen.insert(address.email.to_lowercase()));

        Ok((user_ids, addresses))
    }
}
