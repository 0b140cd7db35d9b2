use axum::extract::State;
use safetech_core::domain::{
    material::{entities::Material, ports::MaterialService, value_objects::ListMaterialsInput},
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
    tag = "material",
    summary = "List materials",
    params(
        ListQuery,
        ("type" = Option<String>, Query, description = "Material type, case-insensitive"),
    ),
    responses(
        (status = 200, body = Paginated<Material>),
        (status = 400, body = ApiErrorResponse)
    )
)]
pub async fn list_materials(
    State(state): State<AppState>,
    QueryParamsExtractor(query): QueryParamsExtractor,
) -> Result<Response<Paginated<Material>>, ApiError> {
    let materials = state
        .service
        .list_materials(ListMaterialsInput { query: Some(query) })
        .await?;

    Ok(Response::OK(materials))
}
