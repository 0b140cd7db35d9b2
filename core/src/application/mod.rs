use crate::{
    domain::common::{SafetechConfig, services::Service},
    infrastructure::{
        db::postgres::Postgres,
        health::repositories::health_check_repository::PostgresHealthCheckRepository,
        material::repositories::material_repository::PostgresMaterialRepository,
        project::repositories::project_repository::PostgresProjectRepository,
        user::repositories::user_repository::PostgresUserRepository,
    },
};

pub type SafetechService = Service<
    PostgresUserRepository,
    PostgresProjectRepository,
    PostgresMaterialRepository,
    PostgresHealthCheckRepository,
>;

pub async fn create_service(config: SafetechConfig) -> Result<SafetechService, anyhow::Error> {
    let postgres = Postgres::new(&config.database).await?;

    let user_repository = PostgresUserRepository::new(postgres.get_db());
    let project_repository = PostgresProjectRepository::new(postgres.get_db());
    let material_repository = PostgresMaterialRepository::new(postgres.get_db());
    let health_check_repository = PostgresHealthCheckRepository::new(postgres.get_db());

    Ok(Service::new(
        user_repository,
        project_repository,
        material_repository,
        health_check_repository,
        config.max_page_size,
    ))
}
