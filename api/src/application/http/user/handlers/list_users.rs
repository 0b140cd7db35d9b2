use axum::extract::State;
use safetech_core::domain::{
    query::Paginated,
    user::{entities::User, ports::UserService, value_objects::ListUsersInput},
};

use crate::application::http::{
    query_extractor::QueryParamsExtractor,
    query_params::ListQuery,
    server::{
        api_entities::{
            api_error::{ApiError, ApiErrorResponse},
            response::Response,
        },
        app_state::AppState,
    },
};

#[utoipa::path(
    get,
    path = "/all",
    tag = "user",
    summary = "List users",
    description = "Paginated users with sort, search and filter support. `role` is matched case-insensitively (`project_manager`, `PROJECT MANAGER`, ...).",
    params(
        ListQuery,
        ("role" = Option<String>, Query, description = "Role filter, repeat for several roles"),
    ),
    responses(
        (status = 200, body = Paginated<User>),
        (status = 400, body = ApiErrorResponse)
    )
)]
pub async fn list_users(
    State(state): State<AppState>,
    QueryParamsExtractor(query): QueryParamsExtractor,
) -> Result<Response<Paginated<User>>, ApiError> {
    let users = state
        .service
        .list_users(ListUsersInput { query: Some(query) })
        .await?;

    Ok(Response::OK(users))
}
