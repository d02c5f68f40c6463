//! EventLog entity <-> model mapper

use worklog_core::entities::{EventLog, LogType};
use worklog_core::error::DomainError;

use crate::models::EventLogModel;

/// Convert EventLogModel to EventLog entity; fails on an unknown event type
impl TryFrom<EventLogModel> for EventLog {
    type Error = DomainError;

    fn try_from(model: EventLogModel) -> Result<Self, Self::Error> {
        let event_type = LogType::from_i32(model.event_type).ok_or_else(|| {
            DomainError::DatabaseError(format!(
                "event_logs.{}: unknown event_type {}",
                model.id, model.event_type
            ))
        })?;

        Ok(EventLog {
            id: model.id,
            work_log_id: model.work_log_id,
            company_id: model.company_id,
            project_id: model.project_id,
            user_id: model.user_id,
            event_type,
            created_at: model.created_at,
        })
    }
}
