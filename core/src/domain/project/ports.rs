use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    project::{entities::Project, value_objects::ListProjectsInput},
    query::{CompiledQuery, ModelSchema, Paginated},
};

pub trait ProjectService: Send + Sync {
    fn list_projects(
        &self,
        input: ListProjectsInput,
    ) -> impl Future<Output = Result<Paginated<Project>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait ProjectRepository: Send + Sync {
    fn schema(&self) -> ModelSchema;

    /// Runs `query` with the manager joined under its alias.
    fn find_page(
        &self,
        query: CompiledQuery,
    ) -> impl Future<Output = Result<Paginated<Project>, CoreError>> + Send;
}
