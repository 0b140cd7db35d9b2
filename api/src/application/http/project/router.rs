use super::handlers::list_projects::{__path_list_projects, list_projects};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_projects))]
pub struct ProjectApiDoc;

pub fn project_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/projects/all", state.args.server.root_path),
        get(list_projects),
    )
}
