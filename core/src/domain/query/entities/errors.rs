use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("Malformed filter: {message}")]
    MalformedFilter { message: String },

    #[error("Filter must be a JSON object")]
    FilterNotObject,

    #[error("Invalid date for {field}: {value}")]
    InvalidDate { field: String, value: String },

    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: String, value: String },
}

impl From<serde_json::Error> for QueryError {
    fn from(error: serde_json::Error) -> Self {
        QueryError::MalformedFilter {
            message: error.to_string(),
        }
    }
}
