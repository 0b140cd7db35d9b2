use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::{
    common::entities::app_errors::CoreError,
    material::{entities::Material, ports::MaterialRepository},
    query::{CompiledQuery, ModelSchema, Paginated},
};
use crate::entity::materials::Entity as MaterialEntity;
use crate::infrastructure::query::{EntityColumns, QueryTarget, fetch_page};

#[derive(Debug, Clone)]
pub struct PostgresMaterialRepository {
    pub db: DatabaseConnection,
    columns: EntityColumns<MaterialEntity>,
}

impl PostgresMaterialRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            columns: EntityColumns::new(),
        }
    }
}

impl MaterialRepository for PostgresMaterialRepository {
    fn schema(&self) -> ModelSchema {
        self.columns.schema()
    }

    async fn find_page(&self, query: CompiledQuery) -> Result<Paginated<Material>, CoreError> {
        let target = QueryTarget::new(&self.columns, &[]);
        let select = target.apply(MaterialEntity::find(), &query)?;
        let (models, count) = fetch_page(&self.db, select, &query).await?;

        Ok(Paginated {
            items: models.into_iter().map(Material::from).collect(),
            page: query.page,
            limit: query.limit,
            count,
        })
    }
}
