//! EventLog entity - audit record paired with a work log

use chrono::{DateTime, Utc};

use super::work_log::{LogType, WorkLog};

/// Audit entry mirroring a work log in the company-wide event stream.
///
/// Its `created_at` is kept equal to the work log's `started_at`, including
/// after edits that move the start time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventLog {
    pub id: i64,
    pub work_log_id: i64,
    pub company_id: i64,
    pub project_id: i64,
    pub user_id: Option<i64>,
    pub event_type: LogType,
    pub created_at: DateTime<Utc>,
}

impl EventLog {
    /// Build the audit entry for a freshly created work log
    pub fn for_work_log(work_log: &WorkLog) -> Self {
        Self {
            id: 0,
            work_log_id: work_log.id,
            company_id: work_log.company_id,
            project_id: work_log.project_id,
            user_id: work_log.user_id,
            event_type: work_log.log_type,
            created_at: work_log.started_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_copies_context_from_work_log() {
        let mut log = WorkLog::for_task(10, 20, 30, None);
        log.id = 7;
        log.user_id = Some(42);
        log.log_type = LogType::WorkAdded;

        let event = EventLog::for_work_log(&log);
        assert_eq!(event.work_log_id, 7);
        assert_eq!(event.company_id, 30);
        assert_eq!(event.project_id, 20);
        assert_eq!(event.user_id, Some(42));
        assert_eq!(event.event_type, LogType::WorkAdded);
        assert_eq!(event.created_at, log.started_at);
    }
}
