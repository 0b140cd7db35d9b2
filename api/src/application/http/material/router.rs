use super::handlers::list_materials::{__path_list_materials, list_materials};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_materials))]
pub struct MaterialApiDoc;

pub fn material_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/materials/all", state.args.server.root_path),
        get(list_materials),
    )
}
