use serde_json::{Map, Value};
use tracing::debug;

use crate::domain::query::{
    entities::{
        compiled_query::{
            CompiledQuery, DEFAULT_LIMIT, DEFAULT_PAGE, FieldRef, Predicate, PredicateValue,
            Search, SortDirection, SortKey, SortTarget,
        },
        errors::QueryError,
    },
    helpers::{parse_date, parse_number, parse_positive},
    value_objects::{AssociationDescriptor, FieldKind, ModelSchema, RawQuery},
};

/// Field every `from`/`to` bound applies to.
pub const CREATED_AT_FIELD: &str = "createdAt";

/// Compiles raw list parameters into pagination, sort, filter and search.
///
/// `None` stands for a request without any query object and yields the
/// defaults with a [`Search::Blank`] search; a present query always yields a
/// [`Search::Clause`].
pub fn compile_query(
    query: Option<&RawQuery>,
    schema: &ModelSchema,
    associations: &[AssociationDescriptor],
) -> Result<CompiledQuery, QueryError> {
    let Some(query) = query else {
        return Ok(CompiledQuery::defaults(&schema.primary_key));
    };

    let page = query
        .scalar("page")
        .and_then(parse_positive)
        .unwrap_or(DEFAULT_PAGE);
    let limit = query
        .scalar("limit")
        .and_then(parse_positive)
        .unwrap_or(DEFAULT_LIMIT);

    let sort = match query.scalar("sort") {
        Some(sort) => compile_sort(sort, &schema.primary_key, associations),
        None => vec![SortKey::model(&schema.primary_key, SortDirection::Asc)],
    };

    let filter = match query.scalar("filter") {
        Some(raw) => compile_filter(raw, schema)?,
        None => Vec::new(),
    };

    let search = match query.scalar("search") {
        Some(term) => compile_search(term, schema, associations),
        None => None,
    };

    Ok(CompiledQuery {
        page,
        limit,
        sort,
        filter,
        search: Search::Clause(search),
    })
}

fn parse_direction(direction: Option<&str>) -> SortDirection {
    match direction.map(str::trim) {
        Some(direction) if direction.eq_ignore_ascii_case("desc") => SortDirection::Desc,
        Some(direction) if direction.is_empty() || direction.eq_ignore_ascii_case("asc") => {
            SortDirection::Asc
        }
        None => SortDirection::Asc,
        Some(other) => {
            debug!("Unknown sort direction {:?}, using ASC", other);
            SortDirection::Asc
        }
    }
}

/// Parses `field-DIR,alias.field-DIR,...`.
fn compile_sort(
    sort: &str,
    primary_key: &str,
    associations: &[AssociationDescriptor],
) -> Vec<SortKey> {
    let mut keys = Vec::new();

    for token in sort.split(',') {
        let token = token.trim();
        if token.is_empty() {
            continue;
        }

        let mut parts = token.split('-');
        let field = parts.next().unwrap_or_default().trim();
        if field.is_empty() {
            continue;
        }
        let direction = parse_direction(parts.next());

        if let Some((alias, nested)) = field.split_once('.') {
            let nested = nested.split('.').next().unwrap_or_default();
            if let Some(association) = associations.iter().find(|a| a.alias == alias) {
                keys.push(SortKey {
                    target: SortTarget::Association {
                        alias: association.alias.clone(),
                        model: association.model.clone(),
                    },
                    field: nested.to_string(),
                    direction,
                });
                continue;
            }
            debug!("No association {:?}, sorting by literal {:?}", alias, field);
        }

        keys.push(SortKey::model(field, direction));
    }

    if keys.is_empty() {
        keys.push(SortKey::model(primary_key, SortDirection::Asc));
    }

    keys
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

fn date_value(field: &str, value: &str) -> Result<PredicateValue, QueryError> {
    parse_date(value)
        .map(PredicateValue::Timestamp)
        .ok_or_else(|| QueryError::InvalidDate {
            field: field.to_string(),
            value: value.to_string(),
        })
}

fn number_value(field: &str, value: &str) -> Result<PredicateValue, QueryError> {
    parse_number(value)
        .map(PredicateValue::number)
        .ok_or_else(|| QueryError::InvalidNumber {
            field: field.to_string(),
            value: value.to_string(),
        })
}

/// Removes `from`/`to` and folds them into a single `createdAt` predicate.
fn take_created_at_range(
    entries: &mut Map<String, Value>,
) -> Result<Option<Predicate>, QueryError> {
    let from = entries
        .remove("from")
        .as_ref()
        .and_then(value_text)
        .filter(|value| !value.is_empty());
    let to = entries
        .remove("to")
        .as_ref()
        .and_then(value_text)
        .filter(|value| !value.is_empty());

    let field = FieldRef::column(CREATED_AT_FIELD);
    let predicate = match (from, to) {
        (Some(from), Some(to)) => Some(Predicate::between(
            field,
            date_value("from", &from)?,
            date_value("to", &to)?,
        )),
        (Some(from), None) => Some(Predicate::gte(field, date_value("from", &from)?)),
        (None, Some(to)) => Some(Predicate::lte(field, date_value("to", &to)?)),
        (None, None) => None,
    };

    Ok(predicate)
}

fn compile_field(
    key: &str,
    kind: Option<FieldKind>,
    value: &Value,
) -> Result<Predicate, QueryError> {
    let field = FieldRef::column(key);
    let text = value_text(value).unwrap_or_default();

    let predicate = match kind {
        Some(FieldKind::Integer) => match text.split_once('-') {
            Some((min, max)) => {
                let max = max.split('-').next().unwrap_or_default();
                Predicate::between(field, number_value(key, min)?, number_value(key, max)?)
            }
            None => Predicate::eq(field, number_value(key, &text)?),
        },
        Some(FieldKind::Date) => Predicate::eq(field, date_value(key, &text)?),
        Some(FieldKind::Uuid) => Predicate::eq(field, PredicateValue::Text(text)),
        Some(FieldKind::Boolean) => Predicate::eq(field, PredicateValue::Bool(text == "true")),
        Some(FieldKind::Float | FieldKind::Text | FieldKind::Other) | None => {
            Predicate::contains(field, &text)
        }
    };

    Ok(predicate)
}

/// Compiles the JSON `filter` parameter, one predicate per key.
fn compile_filter(raw: &str, schema: &ModelSchema) -> Result<Vec<Predicate>, QueryError> {
    let mut entries = match serde_json::from_str::<Value>(raw)? {
        Value::Object(entries) => entries,
        Value::Null => return Ok(Vec::new()),
        _ => return Err(QueryError::FilterNotObject),
    };

    let mut predicates = Vec::with_capacity(entries.len());
    if let Some(range) = take_created_at_range(&mut entries)? {
        predicates.push(range);
    }

    for (key, value) in &entries {
        if value.is_null() {
            debug!("Filter key {:?} is null, skipping", key);
            continue;
        }
        let kind = schema.kind_of(key);
        if kind.is_none() {
            debug!("Filter key {:?} is not a model field, matching as text", key);
        }
        predicates.push(compile_field(key, kind, value)?);
    }

    Ok(predicates)
}

/// How a search term was understood.
enum SearchTerm {
    Number(f64),
    Date(String),
    Text,
}

fn classify(term: &str) -> SearchTerm {
    if let Some(number) = parse_number(term) {
        return SearchTerm::Number(number);
    }
    match parse_date(term) {
        Some(date) => SearchTerm::Date(date.format("%Y-%m-%d").to_string()),
        None => SearchTerm::Text,
    }
}

/// OR over every searchable field of the model and its associations.
fn compile_search(
    term: &str,
    schema: &ModelSchema,
    associations: &[AssociationDescriptor],
) -> Option<Predicate> {
    let parsed = classify(term);

    let mut predicates: Vec<Predicate> = schema
        .fields
        .iter()
        .filter(|field| field.kind.is_searchable())
        .filter_map(|field| {
            let column = FieldRef::column(&field.name);
            match (field.kind, &parsed) {
                (FieldKind::Date, SearchTerm::Date(day)) => Some(Predicate::contains(column, day)),
                (FieldKind::Integer | FieldKind::Float, SearchTerm::Number(number)) => {
                    Some(Predicate::eq(column, PredicateValue::number(*number)))
                }
                (FieldKind::Text, _) => Some(Predicate::contains(column, term)),
                _ => None,
            }
        })
        .collect();

    for association in associations {
        for field in &association.fields {
            let column = FieldRef::joined(&association.alias, field);
            predicates.push(Predicate::contains(column, term));
        }
    }

    Predicate::any(predicates)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::query::{
        entities::compiled_query::Operator,
        value_objects::{FieldDescriptor, ModelRef},
    };
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn schema() -> ModelSchema {
        ModelSchema::new(
            "id",
            vec![
                FieldDescriptor::new("id", FieldKind::Uuid),
                FieldDescriptor::new("name", FieldKind::Text),
                FieldDescriptor::new("age", FieldKind::Integer),
                FieldDescriptor::new("score", FieldKind::Float),
                FieldDescriptor::new("isActive", FieldKind::Boolean),
                FieldDescriptor::new("birthday", FieldKind::Date),
                FieldDescriptor::new("createdAt", FieldKind::Date),
            ],
        )
    }

    fn users() -> Vec<AssociationDescriptor> {
        vec![AssociationDescriptor::new("users", ModelRef::new("users"), &["name", "email"])]
    }

    fn filter(raw: &str) -> RawQuery {
        RawQuery::new().with("filter", raw)
    }

    #[test]
    fn absent_query_returns_documented_defaults() {
        let compiled = compile_query(None, &schema(), &[]).unwrap();
        assert_eq!(
            serde_json::to_value(&compiled).unwrap(),
            json!({
                "page": 1,
                "limit": 10,
                "sort": [["id", "ASC"]],
                "search": "",
                "filter": {},
            })
        );
    }

    #[test]
    fn empty_query_has_an_empty_search_clause() {
        let compiled = compile_query(Some(&RawQuery::new()), &schema(), &[]).unwrap();
        assert_eq!(compiled.search, Search::Clause(None));
        assert_eq!(serde_json::to_value(&compiled).unwrap()["search"], json!({}));
    }

    #[test]
    fn pagination_falls_back_to_defaults() {
        let query = RawQuery::new().with("page", "abc").with("limit", "0");
        let compiled = compile_query(Some(&query), &schema(), &[]).unwrap();
        assert_eq!((compiled.page, compiled.limit), (1, 10));

        let query = RawQuery::new().with("page", "3").with("limit", "25");
        let compiled = compile_query(Some(&query), &schema(), &[]).unwrap();
        assert_eq!((compiled.page, compiled.limit), (3, 25));
    }

    #[test]
    fn limit_has_no_ceiling_at_compile_time() {
        let query = RawQuery::new().with("limit", "100000");
        let compiled = compile_query(Some(&query), &schema(), &[]).unwrap();
        assert_eq!(compiled.limit, 100_000);
    }

    #[test]
    fn from_and_to_collapse_into_one_range() {
        let compiled = compile_query(
            Some(&filter(r#"{"from":"2024-01-01","to":"2024-01-31"}"#)),
            &schema(),
            &[],
        )
        .unwrap();

        assert_eq!(compiled.filter.len(), 1);
        assert_eq!(
            compiled.filter[0],
            Predicate::between(
                FieldRef::column("createdAt"),
                PredicateValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
                PredicateValue::Timestamp(Utc.with_ymd_and_hms(2024, 1, 31, 0, 0, 0).unwrap()),
            )
        );
        assert_eq!(
            serde_json::to_value(&compiled).unwrap()["filter"],
            json!({
                "createdAt": {
                    "between": ["2024-01-01T00:00:00.000Z", "2024-01-31T00:00:00.000Z"]
                }
            })
        );
    }

    #[test]
    fn range_does_not_depend_on_key_order() {
        let compiled = compile_query(
            Some(&filter(r#"{"to":"2024-01-31","name":"x","from":"2024-01-01"}"#)),
            &schema(),
            &[],
        )
        .unwrap();
        let ranges = compiled
            .filter
            .iter()
            .filter(|p| matches!(p, Predicate::Field(c) if c.field.key() == "createdAt"))
            .count();
        assert_eq!(ranges, 1);
        assert_eq!(compiled.filter.len(), 2);
    }

    #[test]
    fn single_bounds_are_open_ranges() {
        let compiled =
            compile_query(Some(&filter(r#"{"from":"2024-01-01"}"#)), &schema(), &[]).unwrap();
        assert!(matches!(
            &compiled.filter[0],
            Predicate::Field(c) if matches!(c.operator, Operator::Gte(_))
        ));

        let compiled =
            compile_query(Some(&filter(r#"{"to":"2024-01-31"}"#)), &schema(), &[]).unwrap();
        assert!(matches!(
            &compiled.filter[0],
            Predicate::Field(c) if matches!(c.operator, Operator::Lte(_))
        ));
    }

    #[test]
    fn integer_filters_support_ranges_and_equality() {
        let compiled = compile_query(Some(&filter(r#"{"age":"18-65"}"#)), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.filter,
            vec![Predicate::between(
                FieldRef::column("age"),
                PredicateValue::Int(18),
                PredicateValue::Int(65),
            )]
        );

        let compiled = compile_query(Some(&filter(r#"{"age":"30"}"#)), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.filter,
            vec![Predicate::eq(FieldRef::column("age"), PredicateValue::Int(30))]
        );

        let compiled = compile_query(Some(&filter(r#"{"age":30}"#)), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.filter,
            vec![Predicate::eq(FieldRef::column("age"), PredicateValue::Int(30))]
        );
    }

    #[test]
    fn typed_filters_follow_the_field_kind() {
        let compiled = compile_query(
            Some(&filter(
                r#"{"id":"ABC-123","isActive":"true","birthday":"1990-05-01","name":"jo"}"#,
            )),
            &schema(),
            &[],
        )
        .unwrap();

        assert_eq!(
            serde_json::to_value(&compiled).unwrap()["filter"],
            json!({
                "id": { "eq": "ABC-123" },
                "isActive": { "eq": true },
                "birthday": { "eq": "1990-05-01T00:00:00.000Z" },
                "name": { "iLike": "%jo%" },
            })
        );
    }

    #[test]
    fn boolean_filter_accepts_json_literals() {
        let compiled =
            compile_query(Some(&filter(r#"{"isActive":false}"#)), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.filter,
            vec![Predicate::eq(FieldRef::column("isActive"), PredicateValue::Bool(false))]
        );
    }

    #[test]
    fn unknown_filter_keys_fall_back_to_substring() {
        let compiled =
            compile_query(Some(&filter(r#"{"nickname":"ace"}"#)), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.filter,
            vec![Predicate::contains(FieldRef::column("nickname"), "ace")]
        );
    }

    #[test]
    fn malformed_filter_is_a_parse_error() {
        let error = compile_query(Some(&filter("{bad")), &schema(), &[]).unwrap_err();
        assert!(matches!(error, QueryError::MalformedFilter { .. }));
    }

    #[test]
    fn null_filter_values_are_skipped() {
        let compiled =
            compile_query(Some(&filter(r#"{"name":null,"age":"3"}"#)), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.filter,
            vec![Predicate::eq(FieldRef::column("age"), PredicateValue::Int(3))]
        );
    }

    #[test]
    fn non_object_filter_is_rejected() {
        let error = compile_query(Some(&filter("[1,2]")), &schema(), &[]).unwrap_err();
        assert_eq!(error, QueryError::FilterNotObject);

        let compiled = compile_query(Some(&filter("null")), &schema(), &[]).unwrap();
        assert!(compiled.filter.is_empty());
    }

    #[test]
    fn unparseable_values_fail_the_request() {
        let error = compile_query(Some(&filter(r#"{"from":"soon"}"#)), &schema(), &[]).unwrap_err();
        assert_eq!(
            error,
            QueryError::InvalidDate {
                field: "from".to_string(),
                value: "soon".to_string()
            }
        );

        let error = compile_query(Some(&filter(r#"{"age":"old"}"#)), &schema(), &[]).unwrap_err();
        assert!(matches!(error, QueryError::InvalidNumber { .. }));
    }

    #[test]
    fn sort_defaults_to_primary_key() {
        let compiled = compile_query(Some(&RawQuery::new()), &schema(), &[]).unwrap();
        assert_eq!(compiled.sort, vec![SortKey::model("id", SortDirection::Asc)]);
    }

    #[test]
    fn sort_parses_fields_and_directions() {
        let query = RawQuery::new().with("sort", "name-DESC,age,createdAt-asc");
        let compiled = compile_query(Some(&query), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.sort,
            vec![
                SortKey::model("name", SortDirection::Desc),
                SortKey::model("age", SortDirection::Asc),
                SortKey::model("createdAt", SortDirection::Asc),
            ]
        );
    }

    #[test]
    fn sort_on_association_targets_the_joined_model() {
        let query = RawQuery::new().with("sort", "users.name-DESC");
        let compiled = compile_query(Some(&query), &schema(), &users()).unwrap();
        assert_eq!(
            compiled.sort,
            vec![SortKey {
                target: SortTarget::Association {
                    alias: "users".to_string(),
                    model: ModelRef::new("users"),
                },
                field: "name".to_string(),
                direction: SortDirection::Desc,
            }]
        );
    }

    #[test]
    fn sort_on_unknown_alias_passes_the_literal_through() {
        let query = RawQuery::new().with("sort", "owners.name-DESC");
        let compiled = compile_query(Some(&query), &schema(), &users()).unwrap();
        assert_eq!(
            compiled.sort,
            vec![SortKey::model("owners.name", SortDirection::Desc)]
        );
    }

    #[test]
    fn numeric_search_hits_numbers_by_equality_and_text_by_substring() {
        let narrow = ModelSchema::new(
            "id",
            vec![
                FieldDescriptor::new("age", FieldKind::Integer),
                FieldDescriptor::new("name", FieldKind::Text),
            ],
        );
        let query = RawQuery::new().with("search", "42");
        let compiled = compile_query(Some(&query), &narrow, &[]).unwrap();
        assert_eq!(
            compiled.search,
            Search::Clause(Some(Predicate::Or(vec![
                Predicate::eq(FieldRef::column("age"), PredicateValue::Int(42)),
                Predicate::contains(FieldRef::column("name"), "42"),
            ])))
        );
    }

    #[test]
    fn date_search_matches_the_day_of_date_fields() {
        let query = RawQuery::new().with("search", "2024-02-10T15:00:00Z");
        let compiled = compile_query(Some(&query), &schema(), &[]).unwrap();
        let Some(Predicate::Or(predicates)) = compiled.search.predicate().cloned() else {
            panic!("expected an OR clause");
        };
        assert!(predicates.contains(&Predicate::contains(
            FieldRef::column("birthday"),
            "2024-02-10"
        )));
        assert!(predicates.contains(&Predicate::contains(
            FieldRef::column("createdAt"),
            "2024-02-10"
        )));
        assert!(predicates.contains(&Predicate::contains(
            FieldRef::column("name"),
            "2024-02-10T15:00:00Z"
        )));
        assert_eq!(predicates.len(), 3);
    }

    #[test]
    fn search_skips_uuid_and_boolean_fields() {
        let query = RawQuery::new().with("search", "true");
        let compiled = compile_query(Some(&query), &schema(), &[]).unwrap();
        assert_eq!(
            compiled.search,
            Search::Clause(Some(Predicate::Or(vec![Predicate::contains(
                FieldRef::column("name"),
                "true"
            )])))
        );
    }

    #[test]
    fn search_reaches_association_fields() {
        let query = RawQuery::new().with("search", "ann");
        let compiled = compile_query(Some(&query), &schema(), &users()).unwrap();
        assert_eq!(
            serde_json::to_value(&compiled).unwrap()["search"],
            json!({
                "or": [
                    { "name": { "iLike": "%ann%" } },
                    { "users.name": { "iLike": "%ann%" } },
                    { "users.email": { "iLike": "%ann%" } },
                ]
            })
        );
    }

    #[test]
    fn search_without_matching_fields_is_empty() {
        let flags = ModelSchema::new(
            "id",
            vec![
                FieldDescriptor::new("id", FieldKind::Uuid),
                FieldDescriptor::new("isActive", FieldKind::Boolean),
            ],
        );
        let query = RawQuery::new().with("search", "anything");
        let compiled = compile_query(Some(&query), &flags, &[]).unwrap();
        assert_eq!(compiled.search, Search::Clause(None));
    }
}
