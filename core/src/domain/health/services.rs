use crate::domain::{
    common::{entities::app_errors::CoreError, services::Service},
    health::{
        entities::DatabaseHealthStatus,
        ports::{HealthCheckRepository, HealthCheckService},
    },
    material::ports::MaterialRepository,
    project::ports::ProjectRepository,
    user::ports::UserRepository,
};

impl<U, P, M, HC> HealthCheckService for Service<U, P, M, HC>
where
    U: UserRepository,
    P: ProjectRepository,
    M: MaterialRepository,
    HC: HealthCheckRepository,
{
    async fn readness(&self) -> Result<DatabaseHealthStatus, CoreError> {
        self.health_check_repository.readness().await
    }

    async fn health(&self) -> Result<u64, CoreError> {
        self.health_check_repository.health().await
    }
}
