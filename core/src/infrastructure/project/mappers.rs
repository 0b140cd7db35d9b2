use chrono::{TimeZone, Utc};

use crate::domain::project::entities::{Project, ProjectManager};
use crate::entity::{projects::Model as ProjectModel, users::Model as UserModel};

impl From<&UserModel> for ProjectManager {
    fn from(model: &UserModel) -> Self {
        ProjectManager {
            id: model.id,
            name: model.name.clone(),
            email: model.email.clone(),
        }
    }
}

impl From<ProjectModel> for Project {
    fn from(model: ProjectModel) -> Self {
        let created_at = Utc.from_utc_datetime(&model.created_at);
        let updated_at = Utc.from_utc_datetime(&model.updated_at);
        let start_date = model.start_date.map(|dt| dt.and_utc());
        Project {
            id: model.id,
            name: model.name,
            description: model.description,
            status: model.status,
            budget: model.budget,
            progress: model.progress,
            manager_id: model.manager_id,
            manager: None,
            is_archived: model.is_archived,
            start_date,
            created_at,
            updated_at,
        }
    }
}
