use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::ports::HealthCheckRepository,
    material::ports::MaterialRepository,
    project::{
        entities::Project,
        ports::{ProjectRepository, ProjectService},
        value_objects::{ListProjectsInput, STATUS_PARAM, project_associations},
    },
    query::{
        Paginated, compile_query,
        normalizers::{EnumKind, create_case_insensitive_filter},
    },
    user::ports::UserRepository,
};

impl<U, P, M, HC> ProjectService for Service<U, P, M, HC>
where
    U: UserRepository,
    P: ProjectRepository,
    M: MaterialRepository,
    HC: HealthCheckRepository,
{
    async fn list_projects(
        &self,
        input: ListProjectsInput,
    ) -> Result<Paginated<Project>, CoreError> {
        let schema = self.project_repository.schema();
        let associations = project_associations();

        let status = input
            .query
            .as_ref()
            .and_then(|query| query.get(STATUS_PARAM))
            .map(|status| status.clone().split_commas())
            .and_then(|status| {
                create_case_insensitive_filter("status", &status, EnumKind::Status)
            });

        let compiled = compile_query(input.query.as_ref(), &schema, &associations)?
            .with_max_limit(self.max_page_size)
            .and_filter(status);

        self.project_repository.find_page(compiled).await
    }
}
