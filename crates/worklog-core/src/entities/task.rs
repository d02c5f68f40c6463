//! Task entity - projection of the task a work log is attached to

/// Task projection carrying what the work-log component reads and writes:
/// context ids for stamping new logs, the description copied into a
/// task-created log, and the aggregate of logged work time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub id: i64,
    pub name: String,
    pub project_id: i64,
    pub company_id: i64,
    pub description: String,
    /// Aggregate of logged work, recomputed from the task's work logs
    pub worked_minutes: i64,
}
