use safetech_core::domain::query::RawQuery;
use serde::Deserialize;
use utoipa::IntoParams;

/// Reserved list parameters, for the API documentation. Handlers read the
/// full query through [`super::query_extractor::QueryParamsExtractor`].
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number (default 1)
    pub page: Option<u64>,
    /// Page size (default 10)
    pub limit: Option<u64>,
    /// Comma-separated `field-DIR` keys, e.g. `name-ASC,manager.name-DESC`
    pub sort: Option<String>,
    /// Free text matched against every searchable field
    pub search: Option<String>,
    /// JSON object of field filters, e.g. `{"from":"2024-01-01","name":"ann"}`
    pub filter: Option<String>,
}

/// Decodes a raw query string. Repeated keys (`role=a&role=b`) become a
/// sequence value.
pub fn parse_query_string(query: &str) -> Result<RawQuery, serde_urlencoded::de::Error> {
    let pairs: Vec<(String, String)> = serde_urlencoded::from_str(query)?;
    Ok(RawQuery::from_pairs(pairs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use safetech_core::domain::query::QueryValue;

    #[test]
    fn test_parse_scalar_values() {
        let query = parse_query_string("page=2&limit=5&search=ann+lee").unwrap();
        assert_eq!(query.scalar("page"), Some("2"));
        assert_eq!(query.scalar("limit"), Some("5"));
        assert_eq!(query.scalar("search"), Some("ann lee"));
    }

    #[test]
    fn test_parse_repeated_keys() {
        let query = parse_query_string("role=admin&role=technician").unwrap();
        let expected = QueryValue::Sequence(vec!["admin".to_string(), "technician".to_string()]);
        assert_eq!(query.get("role"), Some(&expected));
    }

    #[test]
    fn test_parse_encoded_filter() {
        let query = parse_query_string("filter=%7B%22name%22%3A%22ann%22%7D").unwrap();
        assert_eq!(query.scalar("filter"), Some(r#"{"name":"ann"}"#));
    }

    #[test]
    fn test_parse_empty() {
        assert!(parse_query_string("").unwrap().is_empty());
    }
}
