use thiserror::Error;

use crate::domain::query::QueryError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    #[error("Not found")]
    NotFound,

    #[error("Internal server error")]
    InternalServerError,

    #[error(transparent)]
    Query(#[from] QueryError),

    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    #[error("Database unavailable")]
    DatabaseUnavailable,
}
