//! Task entity <-> model mapper

use worklog_core::entities::Task;

use crate::models::TaskModel;

/// Convert TaskModel to Task entity
impl From<TaskModel> for Task {
    fn from(model: TaskModel) -> Self {
        Task {
            id: model.id,
            name: model.name,
            project_id: model.project_id,
            company_id: model.company_id,
            description: model.description,
            worked_minutes: model.worked_minutes,
        }
    }
}
