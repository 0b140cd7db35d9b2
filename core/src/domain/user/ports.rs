use std::future::Future;

use crate::domain::{
    common::entities::app_errors::CoreError,
    query::{CompiledQuery, ModelSchema, Paginated},
    user::{entities::User, value_objects::ListUsersInput},
};

pub trait UserService: Send + Sync {
    fn list_users(
        &self,
        input: ListUsersInput,
    ) -> impl Future<Output = Result<Paginated<User>, CoreError>> + Send;
}

#[cfg_attr(test, mockall::automock)]
pub trait UserRepository: Send + Sync {
    /// Field metadata of the `users` model.
    fn schema(&self) -> ModelSchema;

    fn find_page(
        &self,
        query: CompiledQuery,
    ) -> impl Future<Output = Result<Paginated<User>, CoreError>> + Send;
}
