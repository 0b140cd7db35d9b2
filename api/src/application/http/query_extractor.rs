use axum::{
    extract::FromRequestParts,
    http::request::Parts,
    response::{IntoResponse, Response},
};
use safetech_core::domain::query::RawQuery;

use super::{query_params::parse_query_string, server::api_entities::api_error::ApiError};

/// Extractor for the raw list parameters (`page`, `limit`, `sort`,
/// `search`, `filter` and endpoint specific keys such as `role`).
///
/// Usage:
/// ```rust,ignore
/// async fn handler(
///     QueryParamsExtractor(query): QueryParamsExtractor,
/// ) -> Result<Response<Paginated<User>>, ApiError> {
///     // hand `query` to the listing service
/// }
/// ```
#[derive(Debug, Clone)]
pub struct QueryParamsExtractor(pub RawQuery);

impl<S> FromRequestParts<S> for QueryParamsExtractor
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let query_string = parts.uri.query().unwrap_or("");
        let query = parse_query_string(query_string).map_err(|e| {
            ApiError::BadRequest(format!("Invalid query string: {}", e)).into_response()
        })?;

        Ok(QueryParamsExtractor(query))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use serde_json::{Value, json};

    async fn echo(QueryParamsExtractor(query): QueryParamsExtractor) -> Json<Value> {
        Json(json!({
            "page": query.scalar("page"),
            "status": query.get("statusFilter"),
        }))
    }

    fn server() -> TestServer {
        TestServer::new(Router::new().route("/echo", get(echo))).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_query_values() {
        let response = server()
            .get("/echo?page=3&statusFilter=new&statusFilter=complete")
            .await;

        response.assert_status_ok();
        response.assert_json(&json!({
            "page": "3",
            "status": ["new", "complete"],
        }));
    }

    #[tokio::test]
    async fn test_missing_query_is_empty() {
        let response = server().get("/echo").await;
        response.assert_json(&json!({ "page": null, "status": null }));
    }
}
