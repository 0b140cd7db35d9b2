use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A single query-string value as received from the client.
///
/// A key that was not sent at all is represented by `Option::None` at the
/// lookup site, never by an empty variant here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    Scalar(String),
    Sequence(Vec<String>),
}

impl QueryValue {
    /// Scalar view of the value. Sequences yield their first element.
    pub fn first(&self) -> Option<&str> {
        match self {
            QueryValue::Scalar(value) => Some(value.as_str()),
            QueryValue::Sequence(values) => values.first().map(String::as_str),
        }
    }

    /// An empty scalar is falsy, a sequence never is (even when empty).
    pub fn is_empty(&self) -> bool {
        matches!(self, QueryValue::Scalar(value) if value.is_empty())
    }

    /// Splits a comma-separated scalar into a sequence, e.g.
    /// `statusFilter=new,in progress`.
    pub fn split_commas(self) -> Self {
        match self {
            QueryValue::Scalar(value) if value.contains(',') => QueryValue::Sequence(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|part| !part.is_empty())
                    .map(str::to_string)
                    .collect(),
            ),
            other => other,
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(value.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(value)
    }
}

impl From<Vec<String>> for QueryValue {
    fn from(values: Vec<String>) -> Self {
        QueryValue::Sequence(values)
    }
}

/// Raw query parameters of a list request.
///
/// Reserved keys are `page`, `limit`, `sort`, `search` and `filter`; any
/// other key (`role`, `statusFilter`, `type`, ...) is kept for the
/// endpoint-specific normalizers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawQuery {
    params: HashMap<String, QueryValue>,
}

impl RawQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a query from decoded `key=value` pairs. Repeated keys are
    /// folded into a sequence, preserving their order.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut params: HashMap<String, QueryValue> = HashMap::new();

        for (key, value) in pairs {
            let key = key.into();
            let value = value.into();
            let merged = match params.remove(&key) {
                None => QueryValue::Scalar(value),
                Some(QueryValue::Scalar(previous)) => QueryValue::Sequence(vec![previous, value]),
                Some(QueryValue::Sequence(mut values)) => {
                    values.push(value);
                    QueryValue::Sequence(values)
                }
            };
            params.insert(key, merged);
        }

        Self { params }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<QueryValue>) {
        self.params.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.params.get(key)
    }

    /// Non-empty scalar value for `key`.
    pub fn scalar(&self, key: &str) -> Option<&str> {
        self.params
            .get(key)
            .and_then(QueryValue::first)
            .filter(|value| !value.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Primitive storage kind of a model field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldKind {
    Integer,
    Float,
    Date,
    Uuid,
    Boolean,
    Text,
    Other,
}

impl FieldKind {
    /// Whether a plain-text search can ever consider this field.
    pub fn is_searchable(&self) -> bool {
        !matches!(self, FieldKind::Uuid | FieldKind::Boolean | FieldKind::Other)
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldKind::Integer => write!(f, "Integer"),
            FieldKind::Float => write!(f, "Float"),
            FieldKind::Date => write!(f, "Date"),
            FieldKind::Uuid => write!(f, "Uuid"),
            FieldKind::Boolean => write!(f, "Boolean"),
            FieldKind::Text => write!(f, "Text"),
            FieldKind::Other => write!(f, "Other"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub kind: FieldKind,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }
}

/// Field metadata of the model being listed, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelSchema {
    pub primary_key: String,
    pub fields: Vec<FieldDescriptor>,
}

impl ModelSchema {
    pub fn new(primary_key: impl Into<String>, fields: Vec<FieldDescriptor>) -> Self {
        Self {
            primary_key: primary_key.into(),
            fields,
        }
    }

    pub fn kind_of(&self, name: &str) -> Option<FieldKind> {
        self.fields
            .iter()
            .find(|field| field.name == name)
            .map(|field| field.kind)
    }
}

/// Reference to a queryable model, by table name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModelRef(pub String);

impl ModelRef {
    pub fn new(table: impl Into<String>) -> Self {
        Self(table.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// A joined model taking part in sort and search under `alias`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssociationDescriptor {
    pub alias: String,
    pub model: ModelRef,
    pub fields: Vec<String>,
}

impl AssociationDescriptor {
    pub fn new(alias: impl Into<String>, model: ModelRef, fields: &[&str]) -> Self {
        Self {
            alias: alias.into(),
            model,
            fields: fields.iter().map(|field| field.to_string()).collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub limit: u64,
    pub count: u64,
}
