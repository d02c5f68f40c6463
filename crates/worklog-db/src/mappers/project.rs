//! Project entity <-> model mapper

use worklog_core::entities::Project;

use crate::models::ProjectModel;

/// Convert ProjectModel to Project entity
impl From<ProjectModel> for Project {
    fn from(model: ProjectModel) -> Self {
        Project {
            id: model.id,
            name: model.name,
            company_id: model.company_id,
            customer_id: model.customer_id,
            completed_at: model.completed_at,
        }
    }
}
