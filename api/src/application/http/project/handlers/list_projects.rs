use axum::extract::State;
use safetech_core::domain::{
    project::{entities::Project, ports::ProjectService, value_objects::ListProjectsInput},
    query::Paginated,
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
    tag = "project",
    summary = "List projects",
    description = "Paginated projects with their manager. Sort and search reach the manager through `manager.name` and `manager.email`.",
    params(
        ListQuery,
        ("statusFilter" = Option<String>, Query, description = "Comma-separated statuses, e.g. `new,in progress`"),
    ),
    responses(
        (status = 200, body = Paginated<Project>),
        (status = 400, body = ApiErrorResponse)
    )
)]
pub async fn list_projects(
    State(state): State<AppState>,
    QueryParamsExtractor(query): QueryParamsExtractor,
) -> Result<Response<Paginated<Project>>, ApiError> {
    let projects = state
        .service
        .list_projects(ListProjectsInput { query: Some(query) })
        .await?;

    Ok(Response::OK(projects))
}
