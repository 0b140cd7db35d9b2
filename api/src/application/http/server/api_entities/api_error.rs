use axum::{Json, http::StatusCode, response::IntoResponse};
use safetech_core::domain::common::entities::app_errors::CoreError;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct ApiErrorResponse {
    pub code: String,
    pub message: String,
    pub status: u16,
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InternalServerError(String),
}

impl ApiError {
    fn parts(&self) -> (StatusCode, &'static str) {
        match self {
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "E_BAD_REQUEST"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "E_NOT_FOUND"),
            ApiError::InternalServerError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "E_INTERNAL_SERVER_ERROR")
            }
        }
    }
}

impl From<CoreError> for ApiError {
    fn from(error: CoreError) -> Self {
        match error {
            CoreError::Query(_) | CoreError::InvalidQuery(_) => {
                ApiError::BadRequest(error.to_string())
            }
            CoreError::NotFound => ApiError::NotFound(error.to_string()),
            CoreError::InternalServerError | CoreError::DatabaseUnavailable => {
                error!("Request failed: {}", error);
                ApiError::InternalServerError(error.to_string())
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, code) = self.parts();
        let body = ApiErrorResponse {
            code: code.to_string(),
            message: self.to_string(),
            status: status.as_u16(),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Router, routing::get};
    use axum_test::TestServer;
    use safetech_core::domain::query::QueryError;
    use serde_json::json;

    async fn failing(error: CoreError) -> Result<(), ApiError> {
        Err(ApiError::from(error))
    }

    fn malformed_filter() -> CoreError {
        CoreError::Query(QueryError::MalformedFilter {
            message: "expected value at line 1 column 1".to_string(),
        })
    }

    fn unknown_field() -> CoreError {
        CoreError::InvalidQuery("unknown field: password".to_string())
    }

    fn server() -> TestServer {
        let router = Router::new()
            .route("/malformed", get(|| failing(malformed_filter())))
            .route("/unknown", get(|| failing(unknown_field())))
            .route("/missing", get(|| failing(CoreError::NotFound)))
            .route("/down", get(|| failing(CoreError::DatabaseUnavailable)));

        TestServer::new(router).unwrap()
    }

    #[tokio::test]
    async fn test_query_errors_are_bad_requests() {
        let server = server();

        let response = server.get("/malformed").await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({
            "code": "E_BAD_REQUEST",
            "message": "Malformed filter: expected value at line 1 column 1",
            "status": 400,
        }));

        server
            .get("/unknown")
            .await
            .assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_not_found_and_internal_errors() {
        let server = server();

        let response = server.get("/missing").await;
        response.assert_status(StatusCode::NOT_FOUND);
        assert_eq!(response.json::<ApiErrorResponse>().code, "E_NOT_FOUND");

        let response = server.get("/down").await;
        response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.json::<ApiErrorResponse>().status, 500);
    }
}
