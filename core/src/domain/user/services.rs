use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    material::ports::MaterialRepository,
    project::ports::ProjectRepository,
    query::{
        Paginated, compile_query,
        normalizers::{EnumKind, create_case_insensitive_filter},
    },
    user::{
        entities::User,
        ports::{UserRepository, UserService},
        value_objects::{ListUsersInput, ROLE_PARAM},
    },
};

impl<U, P, M, HC> UserService for Service<U, P, M, HC>
where
    U: UserRepository,
    P: ProjectRepository,
    M: MaterialRepository,
    HC: HealthCheckRepository,
{
    async fn list_users(&self, input: ListUsersInput) -> Result<Paginated<User>, CoreError> {
        let schema = self.user_repository.schema();
        let role = input
            .query
            .as_ref()
            .and_then(|query| query.get(ROLE_PARAM))
            .and_then(|role| create_case_insensitive_filter("role", role, EnumKind::Role));

        let compiled = compile_query(input.query.as_ref(), &schema, &[])?
            .with_max_limit(self.max_page_size)
            .and_filter(role);

        self.user_repository.find_page(compiled).await
    }
}
