use super::handlers::list_users::{__path_list_users, list_users};
use crate::application::http::server::app_state::AppState;

use axum::{Router, routing::get};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(paths(list_users))]
pub struct UserApiDoc;

pub fn user_routes(state: AppState) -> Router<AppState> {
    Router::new().route(
        &format!("{}/users/all", state.args.server.root_path),
        get(list_users),
    )
}
