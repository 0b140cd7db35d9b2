use chrono::{DateTime, SecondsFormat, Utc};
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::domain::query::value_objects::ModelRef;

pub const DEFAULT_PAGE: u64 = 1;
pub const DEFAULT_LIMIT: u64 = 10;

/// A literal a predicate compares against.
#[derive(Debug, Clone, PartialEq)]
pub enum PredicateValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl PredicateValue {
    /// Numbers without a fractional part are kept as integers.
    pub fn number(value: f64) -> Self {
        if value.fract() == 0.0 && value >= i64::MIN as f64 && value <= i64::MAX as f64 {
            PredicateValue::Int(value as i64)
        } else {
            PredicateValue::Float(value)
        }
    }
}

impl Serialize for PredicateValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            PredicateValue::Int(value) => serializer.serialize_i64(*value),
            PredicateValue::Float(value) => serializer.serialize_f64(*value),
            PredicateValue::Bool(value) => serializer.serialize_bool(*value),
            PredicateValue::Text(value) => serializer.serialize_str(value),
            PredicateValue::Timestamp(value) => {
                serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
            }
        }
    }
}

/// The column a predicate or sort key targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldRef {
    /// A field of the model being listed (or an unknown literal name).
    Column(String),
    /// A field of a joined model, addressed through its alias.
    Joined { alias: String, field: String },
}

impl FieldRef {
    pub fn column(name: impl Into<String>) -> Self {
        FieldRef::Column(name.into())
    }

    pub fn joined(alias: impl Into<String>, field: impl Into<String>) -> Self {
        FieldRef::Joined {
            alias: alias.into(),
            field: field.into(),
        }
    }

    pub fn key(&self) -> String {
        match self {
            FieldRef::Column(name) => name.clone(),
            FieldRef::Joined { alias, field } => format!("{alias}.{field}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Operator {
    Eq(PredicateValue),
    In(Vec<PredicateValue>),
    /// Inclusive on both ends.
    Between(PredicateValue, PredicateValue),
    Gte(PredicateValue),
    Lte(PredicateValue),
    /// Case-insensitive `LIKE` with a ready-made pattern.
    ILike(String),
}

impl Serialize for Operator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        match self {
            Operator::Eq(value) => map.serialize_entry("eq", value)?,
            Operator::In(values) => map.serialize_entry("in", values)?,
            Operator::Between(low, high) => map.serialize_entry("between", &[low, high])?,
            Operator::Gte(value) => map.serialize_entry("gte", value)?,
            Operator::Lte(value) => map.serialize_entry("lte", value)?,
            Operator::ILike(pattern) => map.serialize_entry("iLike", pattern)?,
        }
        map.end()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldCondition {
    pub field: FieldRef,
    pub operator: Operator,
}

/// Structured condition handed to the storage layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Field(FieldCondition),
    And(Vec<Predicate>),
    Or(Vec<Predicate>),
}

impl Predicate {
    fn field(field: FieldRef, operator: Operator) -> Self {
        Predicate::Field(FieldCondition { field, operator })
    }

    pub fn eq(field: FieldRef, value: PredicateValue) -> Self {
        Self::field(field, Operator::Eq(value))
    }

    pub fn is_in(field: FieldRef, values: Vec<PredicateValue>) -> Self {
        Self::field(field, Operator::In(values))
    }

    pub fn between(field: FieldRef, low: PredicateValue, high: PredicateValue) -> Self {
        Self::field(field, Operator::Between(low, high))
    }

    pub fn gte(field: FieldRef, value: PredicateValue) -> Self {
        Self::field(field, Operator::Gte(value))
    }

    pub fn lte(field: FieldRef, value: PredicateValue) -> Self {
        Self::field(field, Operator::Lte(value))
    }

    /// Case-insensitive substring match: `field ILIKE '%needle%'`.
    pub fn contains(field: FieldRef, needle: &str) -> Self {
        Self::field(field, Operator::ILike(format!("%{needle}%")))
    }

    /// OR of `predicates`, or `None` when there is nothing to combine.
    pub fn any(predicates: Vec<Predicate>) -> Option<Self> {
        if predicates.is_empty() {
            None
        } else {
            Some(Predicate::Or(predicates))
        }
    }
}

struct PredicateEntries<'a>(&'a [Predicate]);

impl Serialize for PredicateEntries<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for predicate in self.0 {
            match predicate {
                Predicate::Field(condition) => {
                    map.serialize_entry(&condition.field.key(), &condition.operator)?
                }
                Predicate::And(children) => map.serialize_entry("and", children)?,
                Predicate::Or(children) => map.serialize_entry("or", children)?,
            }
        }
        map.end()
    }
}

impl Serialize for Predicate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        PredicateEntries(std::slice::from_ref(self)).serialize(serializer)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortTarget {
    Model,
    Association { alias: String, model: ModelRef },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub target: SortTarget,
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn model(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            target: SortTarget::Model,
            field: field.into(),
            direction,
        }
    }
}

impl Serialize for SortKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.target {
            SortTarget::Model => {
                let mut seq = serializer.serialize_seq(Some(2))?;
                seq.serialize_element(&self.field)?;
                seq.serialize_element(self.direction.as_str())?;
                seq.end()
            }
            SortTarget::Association { alias, model } => {
                let mut seq = serializer.serialize_seq(Some(3))?;
                seq.serialize_element(
                    &serde_json::json!({ "model": model.as_str(), "as": alias }),
                )?;
                seq.serialize_element(&self.field)?;
                seq.serialize_element(self.direction.as_str())?;
                seq.end()
            }
        }
    }
}

/// Search part of a compiled query.
///
/// The two variants have deliberately different shapes: when no query was
/// supplied at all the search is `Blank` (serialized as `""`), otherwise it
/// is a clause that may be empty (serialized as `{}`).
#[derive(Debug, Clone, PartialEq)]
pub enum Search {
    Blank,
    Clause(Option<Predicate>),
}

impl Search {
    pub fn predicate(&self) -> Option<&Predicate> {
        match self {
            Search::Blank | Search::Clause(None) => None,
            Search::Clause(Some(predicate)) => Some(predicate),
        }
    }
}

impl Serialize for Search {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Search::Blank => serializer.serialize_str(""),
            Search::Clause(None) => serializer.serialize_map(Some(0))?.end(),
            Search::Clause(Some(predicate)) => predicate.serialize(serializer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CompiledQuery {
    pub page: u64,
    pub limit: u64,
    pub sort: Vec<SortKey>,
    #[serde(serialize_with = "serialize_filter")]
    pub filter: Vec<Predicate>,
    pub search: Search,
}

fn serialize_filter<S: Serializer>(filter: &[Predicate], serializer: S) -> Result<S::Ok, S::Error> {
    PredicateEntries(filter).serialize(serializer)
}

impl CompiledQuery {
    /// Result for a request without any query object.
    pub fn defaults(primary_key: &str) -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            sort: vec![SortKey::model(primary_key, SortDirection::Asc)],
            filter: Vec::new(),
            search: Search::Blank,
        }
    }

    /// `(offset, limit)` of the requested page, `None` when either exceeds
    /// what a signed 64-bit SQL bind holds.
    pub fn window(&self) -> Option<(u64, u64)> {
        let max = i64::MAX as u64;
        let offset = self.page.saturating_sub(1).checked_mul(self.limit)?;
        (offset <= max && self.limit <= max).then_some((offset, self.limit))
    }

    #[must_use]
    pub fn with_max_limit(mut self, max_limit: Option<u64>) -> Self {
        if let Some(max) = max_limit
            && max > 0
        {
            self.limit = self.limit.min(max);
        }
        self
    }

    #[must_use]
    pub fn and_filter(mut self, predicate: Option<Predicate>) -> Self {
        if let Some(predicate) = predicate {
            self.filter.push(predicate);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_serialize_with_blank_search() {
        let compiled = CompiledQuery::defaults("id");
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
    fn empty_clause_serializes_as_empty_object() {
        assert_eq!(serde_json::to_value(Search::Clause(None)).unwrap(), json!({}));
    }

    #[test]
    fn association_sort_key_names_model_and_alias() {
        let key = SortKey {
            target: SortTarget::Association {
                alias: "manager".to_string(),
                model: ModelRef::new("users"),
            },
            field: "name".to_string(),
            direction: SortDirection::Desc,
        };
        assert_eq!(
            serde_json::to_value(&key).unwrap(),
            json!([{ "model": "users", "as": "manager" }, "name", "DESC"])
        );
    }

    #[test]
    fn window_is_derived_from_page_and_limit() {
        let mut compiled = CompiledQuery::defaults("id");
        compiled.page = 3;
        compiled.limit = 25;
        assert_eq!(compiled.window(), Some((50, 25)));

        compiled.page = 1_000_000_000_000_000_000;
        compiled.limit = 10;
        assert_eq!(compiled.window(), None);

        compiled.page = 1;
        compiled.limit = u64::MAX;
        assert_eq!(compiled.window(), None);
    }

    #[test]
    fn max_limit_clamps_but_zero_disables() {
        let mut compiled = CompiledQuery::defaults("id");
        compiled.limit = 5000;
        assert_eq!(compiled.clone().with_max_limit(Some(100)).limit, 100);
        assert_eq!(compiled.clone().with_max_limit(Some(0)).limit, 5000);
        assert_eq!(compiled.with_max_limit(None).limit, 5000);
    }

    #[test]
    fn whole_numbers_become_integers() {
        assert_eq!(PredicateValue::number(42.0), PredicateValue::Int(42));
        assert_eq!(PredicateValue::number(4.5), PredicateValue::Float(4.5));
    }
}
