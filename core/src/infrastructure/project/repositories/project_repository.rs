use std::collections::HashMap;

use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, JoinType, QueryFilter, QuerySelect,
    RelationTrait, sea_query::Alias,
};
use tracing::error;
use uuid::Uuid;

use crate::domain::{
    common::entities::app_errors::CoreError,
    project::{
        entities::{Project, ProjectManager},
        ports::ProjectRepository,
        value_objects::MANAGER_ALIAS,
    },
    query::{CompiledQuery, ModelSchema, Paginated},
};
use crate::entity::{
    projects::{Entity as ProjectEntity, Relation as ProjectRelation},
    users::{Column as UserColumn, Entity as UserEntity},
};
use crate::infrastructure::query::{EntityColumns, JoinedColumns, QueryTarget, fetch_page};

#[derive(Debug, Clone)]
pub struct PostgresProjectRepository {
    pub db: DatabaseConnection,
    columns: EntityColumns<ProjectEntity>,
    joins: Vec<JoinedColumns>,
}

impl PostgresProjectRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            columns: EntityColumns::new(),
            joins: vec![EntityColumns::<UserEntity>::new().joined(MANAGER_ALIAS)],
        }
    }

    async fn fetch_managers(
        &self,
        ids: Vec<Uuid>,
    ) -> Result<HashMap<Uuid, ProjectManager>, CoreError> {
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let managers = UserEntity::find()
            .filter(UserColumn::Id.is_in(ids))
            .all(&self.db)
            .await
            .map_err(|e| {
                error!("Failed to fetch project managers: {}", e);
                CoreError::InternalServerError
            })?
            .iter()
            .map(|model| (model.id, ProjectManager::from(model)))
            .collect();

        Ok(managers)
    }
}

impl ProjectRepository for PostgresProjectRepository {
    fn schema(&self) -> ModelSchema {
        self.columns.schema()
    }

    async fn find_page(&self, query: CompiledQuery) -> Result<Paginated<Project>, CoreError> {
        let select = ProjectEntity::find().join_as(
            JoinType::LeftJoin,
            ProjectRelation::Manager.def(),
            Alias::new(MANAGER_ALIAS),
        );
        let target = QueryTarget::new(&self.columns, &self.joins);
        let select = target.apply(select, &query)?;
        let (models, count) = fetch_page(&self.db, select, &query).await?;

        let mut manager_ids = models
            .iter()
            .filter_map(|model| model.manager_id)
            .collect::<Vec<Uuid>>();
        manager_ids.sort_unstable();
        manager_ids.dedup();
        let managers = self.fetch_managers(manager_ids).await?;

        let items = models
            .into_iter()
            .map(|model| {
                let manager = model.manager_id.and_then(|id| managers.get(&id).cloned());
                Project {
                    manager,
                    ..Project::from(model)
                }
            })
            .collect();

        Ok(Paginated {
            items,
            page: query.page,
            limit: query.limit,
            count,
        })
    }
}
