use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    material::{entities::Material, value_objects::ListMaterialsInput},
    query::{CompiledQuery, ModelSchema, Paginated},
};

pub trait MaterialService: Send + Sync {
    fn list_materials(
        &self,
        input: ListMaterialsInput,
    ) -> impl Future<Output = Result<Paginated<Material>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait MaterialRepository: Send + Sync {
    fn schema(&self) -> ModelSchema;

    fn find_page(
        &self,
        query: CompiledQuery,
    ) -> impl Future<Output = Result<Paginated<Material>, CoreError>> + Send;
}
