//! CalendarEntry entity - iCal export row paired with a work log

/// Exported calendar entry for a work log.
///
/// Destroyed whenever the work log changes (the exported event would be
/// stale) and regenerated by the next calendar export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEntry {
    pub id: i64,
    pub work_log_id: i64,
    /// iCal UID of the exported event
    pub uid: String,
}
