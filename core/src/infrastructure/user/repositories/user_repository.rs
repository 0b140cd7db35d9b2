use sea_orm::{DatabaseConnection, EntityTrait};

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{CompiledQuery, ModelSchema, Paginated},
    user::{entities::User, ports::UserRepository},
};
use crate::entity::users::Entity as UserEntity;
use crate::infrastructure::query::{EntityColumns, QueryTarget, fetch_page};

#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pub db: DatabaseConnection,
    columns: EntityColumns<UserEntity>,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            columns: EntityColumns::new(),
        }
    }
}

impl UserRepository for PostgresUserRepository {
    fn schema(&self) -> ModelSchema {
        self.columns.schema()
    }

    async fn find_page(&self, query: CompiledQuery) -> Result<Paginated<User>, CoreError> {
        let target = QueryTarget::new(&self.columns, &[]);
        let select = target.apply(UserEntity::find(), &query)?;
        let (models, count) = fetch_page(&self.db, select, &query).await?;

        Ok(Paginated {
            items: models.into_iter().map(User::from).collect(),
            page: query.page,
            limit: query.limit,
            count,
        })
    }
}
