use crate::application::http::{
    health::HealthApiDoc, material::router::MaterialApiDoc, project::router::ProjectApiDoc,
    user::router::UserApiDoc,
};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "SafeTech API"
    ),
    nest(
        (path = "/users", api = UserApiDoc),
        (path = "/projects", api = ProjectApiDoc),
        (path = "/materials", api = MaterialApiDoc),
        (path = "/health", api = HealthApiDoc),
    )
)]
pub struct ApiDoc;
