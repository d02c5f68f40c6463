//! WorkLog entity <-> model mapper

use worklog_core::entities::{LogType, WorkLog};
use worklog_core::error::DomainError;
use worklog_core::value_objects::AccessLevel;

use crate::models::WorkLogModel;

/// Convert WorkLogModel to WorkLog entity; fails on an unknown stored log type
impl TryFrom<WorkLogModel> for WorkLog {
    type Error = DomainError;

    fn try_from(model: WorkLogModel) -> Result<Self, Self::Error> {
        let log_type = LogType::from_i32(model.log_type).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "work_logs.{}: unknown log_type {}",
                model.id, model.log_type
            ))
        })?;

        Ok(WorkLog {
            id: model.id,
            user_id: model.user_id,
            email_address_id: model.email_address_id,
            task_id: model.task_id,
            project_id: model.project_id,
            company_id: model.company_id,
            customer_id: model.customer_id,
            access_level: AccessLevel::new(model.access_level),
            started_at: model.started_at,
            duration: model.duration,
            paused_duration: model.paused_duration,
            body: model.body,
            log_type,
            comment: model.comment,
            exported_at: model.exported_at,
            approved: model.approved,
        })
    }
}
