use sea_orm::{
    Condition, ConnectionTrait, EntityName, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, Select, Value,
    sea_query::{Alias, Expr, Order, SimpleExpr, extension::postgres::PgExpr},
};
use tracing::error;
use uuid::Uuid;

use crate::{
    domain::{
        common::entities::app_errors::CoreError,
        query::{
            CompiledQuery, FieldKind,
            entities::compiled_query::{
                FieldCondition, FieldRef, Operator, Predicate, PredicateValue, SortDirection,
                SortKey, SortTarget,
            },
        },
    },
    infrastructure::query::columns::{EntityColumns, JoinedColumns, ResolvedField},
};

fn to_value(value: &PredicateValue) -> Value {
    match value {
        PredicateValue::Int(value) => (*value).into(),
        PredicateValue::Float(value) => (*value).into(),
        PredicateValue::Bool(value) => (*value).into(),
        PredicateValue::Text(value) => value.clone().into(),
        // columns are `timestamp without time zone`, holding UTC
        PredicateValue::Timestamp(value) => value.naive_utc().into(),
    }
}

fn as_text(expr: SimpleExpr) -> Expr {
    Expr::expr(Expr::expr(expr).cast_as(Alias::new("text")))
}

/// Binds `value` for a column of `kind`. Text against a UUID column is
/// parsed, so any spelling of the UUID matches.
fn bind(kind: FieldKind, value: &PredicateValue) -> Result<Value, CoreError> {
    match (kind, value) {
        (FieldKind::Uuid, PredicateValue::Text(text)) => {
            let uuid = Uuid::parse_str(text.trim())
                .map_err(|_| CoreError::InvalidQuery(format!("invalid uuid: {text}")))?;
            Ok(uuid.into())
        }
        _ => Ok(to_value(value)),
    }
}

fn bind_all<'v>(
    kind: FieldKind,
    values: impl IntoIterator<Item = &'v PredicateValue>,
) -> Result<Vec<Value>, CoreError> {
    values.into_iter().map(|value| bind(kind, value)).collect()
}

/// Left-hand side of a comparison. Text literals against other non-text
/// columns compare on the column's text form.
fn operand(field: ResolvedField, values: &[&PredicateValue]) -> Expr {
    let text_literal = values
        .iter()
        .any(|value| matches!(value, PredicateValue::Text(_)));

    if text_literal && !matches!(field.kind, FieldKind::Text | FieldKind::Uuid) {
        as_text(field.expr)
    } else {
        Expr::expr(field.expr)
    }
}

/// `(offset, limit)` of `query`, rejected when it cannot be bound.
fn page_window(query: &CompiledQuery) -> Result<(u64, u64), CoreError> {
    query.window().ok_or_else(|| {
        CoreError::InvalidQuery(format!(
            "page {} with limit {} is out of range",
            query.page, query.limit
        ))
    })
}

fn unknown_field(name: &str) -> CoreError {
    CoreError::InvalidQuery(format!("unknown field: {name}"))
}

/// The listed entity plus the models joined into its select.
pub struct QueryTarget<'a, E: EntityTrait> {
    columns: &'a EntityColumns<E>,
    joins: &'a [JoinedColumns],
}

impl<'a, E: EntityTrait> QueryTarget<'a, E> {
    pub fn new(columns: &'a EntityColumns<E>, joins: &'a [JoinedColumns]) -> Self {
        Self { columns, joins }
    }

    fn resolve(&self, field: &FieldRef) -> Result<ResolvedField, CoreError> {
        match field {
            FieldRef::Column(name) => self
                .columns
                .resolve(name)
                .ok_or_else(|| unknown_field(name)),
            FieldRef::Joined { alias, field: name } => self
                .joins
                .iter()
                .find(|join| join.alias() == alias)
                .and_then(|join| join.resolve(name))
                .ok_or_else(|| unknown_field(&field.key())),
        }
    }

    fn field_condition(&self, condition: &FieldCondition) -> Result<SimpleExpr, CoreError> {
        let field = self.resolve(&condition.field)?;
        let kind = field.kind;

        let expr = match &condition.operator {
            Operator::Eq(value) => operand(field, &[value]).eq(bind(kind, value)?),
            Operator::In(values) => {
                let refs = values.iter().collect::<Vec<&PredicateValue>>();
                operand(field, &refs).is_in(bind_all(kind, values)?)
            }
            Operator::Between(low, high) => {
                let bounds = (bind(kind, low)?, bind(kind, high)?);
                operand(field, &[low, high]).between(bounds.0, bounds.1)
            }
            Operator::Gte(value) => operand(field, &[value]).gte(bind(kind, value)?),
            Operator::Lte(value) => operand(field, &[value]).lte(bind(kind, value)?),
            Operator::ILike(pattern) => {
                let lhs = if field.kind == FieldKind::Text {
                    Expr::expr(field.expr)
                } else {
                    as_text(field.expr)
                };
                lhs.ilike(pattern.as_str())
            }
        };

        Ok(expr)
    }

    pub fn condition(&self, predicate: &Predicate) -> Result<Condition, CoreError> {
        match predicate {
            Predicate::Field(condition) => {
                Ok(Condition::all().add(self.field_condition(condition)?))
            }
            Predicate::And(children) => children
                .iter()
                .try_fold(Condition::all(), |acc, child| {
                    Ok(acc.add(self.condition(child)?))
                }),
            Predicate::Or(children) => children
                .iter()
                .try_fold(Condition::any(), |acc, child| {
                    Ok(acc.add(self.condition(child)?))
                }),
        }
    }

    fn order(&self, key: &SortKey) -> Result<(SimpleExpr, Order), CoreError> {
        let field = match &key.target {
            SortTarget::Model => self.resolve(&FieldRef::column(key.field.as_str()))?,
            SortTarget::Association { alias, .. } => {
                self.resolve(&FieldRef::joined(alias.as_str(), key.field.as_str()))?
            }
        };

        let order = match key.direction {
            SortDirection::Asc => Order::Asc,
            SortDirection::Desc => Order::Desc,
        };

        Ok((field.expr, order))
    }

    /// Adds the filter, search and sort of `query` to `select`. Paging is
    /// left to [`fetch_page`] so the total can be counted first.
    pub fn apply(&self, select: Select<E>, query: &CompiledQuery) -> Result<Select<E>, CoreError> {
        let mut select = select;

        for predicate in &query.filter {
            select = select.filter(self.condition(predicate)?);
        }

        if let Some(search) = query.search.predicate() {
            select = select.filter(self.condition(search)?);
        }

        for key in &query.sort {
            let (expr, order) = self.order(key)?;
            select = select.order_by(expr, order);
        }

        Ok(select)
    }
}

/// Counts every row matching `select`, then loads the requested page.
pub async fn fetch_page<E, C>(
    db: &C,
    select: Select<E>,
    query: &CompiledQuery,
) -> Result<(Vec<E::Model>, u64), CoreError>
where
    E: EntityTrait,
    E::Model: Sync,
    C: ConnectionTrait,
{
    let (offset, limit) = page_window(query)?;

    let count = select.clone().count(db).await.map_err(|e| {
        error!("Failed to count {} rows: {}", E::default().table_name(), e);
        CoreError::InternalServerError
    })?;

    let models = select
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| {
            error!("Failed to fetch {} page: {}", E::default().table_name(), e);
            CoreError::InternalServerError
        })?;

    Ok((models, count))
}
