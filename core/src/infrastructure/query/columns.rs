use sea_orm::{
    ColumnTrait, ColumnType, EntityTrait, IdenStatic, Iterable, PrimaryKeyToColumn,
    sea_query::{Alias, IntoColumnRef, SimpleExpr},
};

use crate::domain::query::{FieldDescriptor, FieldKind, ModelSchema};

/// `created_at` -> `createdAt`.
pub fn to_camel_case(snake: &str) -> String {
    let mut camel = String::with_capacity(snake.len());
    let mut upper = false;
    for c in snake.chars() {
        if c == '_' {
            upper = !camel.is_empty();
        } else if upper {
            camel.extend(c.to_uppercase());
            upper = false;
        } else {
            camel.push(c);
        }
    }
    camel
}

/// `createdAt` -> `created_at`.
pub fn to_snake_case(camel: &str) -> String {
    let mut snake = String::with_capacity(camel.len() + 4);
    for c in camel.chars() {
        if c.is_ascii_uppercase() {
            if !snake.is_empty() {
                snake.push('_');
            }
            snake.push(c.to_ascii_lowercase());
        } else {
            snake.push(c);
        }
    }
    snake
}

pub fn field_kind(column_type: &ColumnType) -> FieldKind {
    match column_type {
        ColumnType::TinyInteger
        | ColumnType::SmallInteger
        | ColumnType::Integer
        | ColumnType::BigInteger
        | ColumnType::TinyUnsigned
        | ColumnType::SmallUnsigned
        | ColumnType::Unsigned
        | ColumnType::BigUnsigned => FieldKind::Integer,
        ColumnType::Float | ColumnType::Double | ColumnType::Decimal(_) | ColumnType::Money(_) => {
            FieldKind::Float
        }
        ColumnType::Date
        | ColumnType::DateTime
        | ColumnType::Timestamp
        | ColumnType::TimestampWithTimeZone => FieldKind::Date,
        ColumnType::Uuid => FieldKind::Uuid,
        ColumnType::Boolean => FieldKind::Boolean,
        ColumnType::Char(_)
        | ColumnType::String(_)
        | ColumnType::Text
        | ColumnType::Enum { .. } => FieldKind::Text,
        _ => FieldKind::Other,
    }
}

/// A field resolved to a SQL expression.
#[derive(Debug, Clone)]
pub struct ResolvedField {
    pub expr: SimpleExpr,
    pub kind: FieldKind,
}

#[derive(Debug, Clone)]
struct ColumnField<C> {
    name: String,
    column: C,
    kind: FieldKind,
}

/// Field map of a sea-orm entity, keyed by camelCase API name.
#[derive(Debug, Clone)]
pub struct EntityColumns<E: EntityTrait> {
    primary_key: String,
    fields: Vec<ColumnField<E::Column>>,
}

impl<E: EntityTrait> Default for EntityColumns<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: EntityTrait> EntityColumns<E> {
    pub fn new() -> Self {
        let fields = E::Column::iter()
            .map(|column| ColumnField {
                name: to_camel_case(column.as_str()),
                kind: field_kind(column.def().get_column_type()),
                column,
            })
            .collect();

        let primary_key = E::PrimaryKey::iter()
            .next()
            .map(|key| to_camel_case(key.into_column().as_str()))
            .unwrap_or_else(|| "id".to_string());

        Self {
            primary_key,
            fields,
        }
    }

    pub fn schema(&self) -> ModelSchema {
        ModelSchema::new(
            self.primary_key.clone(),
            self.fields
                .iter()
                .map(|field| FieldDescriptor::new(field.name.clone(), field.kind))
                .collect(),
        )
    }

    /// Accepts both the API name and the column name.
    fn get(&self, name: &str) -> Option<&ColumnField<E::Column>> {
        self.fields
            .iter()
            .find(|field| field.name == name || field.column.as_str() == name)
    }

    pub fn resolve(&self, name: &str) -> Option<ResolvedField> {
        self.get(name).map(|field| ResolvedField {
            expr: SimpleExpr::Column((E::default(), field.column).into_column_ref()),
            kind: field.kind,
        })
    }

    /// The same fields addressed through a join alias.
    pub fn joined(&self, alias: &str) -> JoinedColumns {
        JoinedColumns {
            alias: alias.to_string(),
            fields: self
                .fields
                .iter()
                .map(|field| JoinedField {
                    name: field.name.clone(),
                    column: field.column.as_str().to_string(),
                    kind: field.kind,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone)]
struct JoinedField {
    name: String,
    column: String,
    kind: FieldKind,
}

/// Columns of a model joined under an alias, e.g. `manager` for `users`.
#[derive(Debug, Clone)]
pub struct JoinedColumns {
    alias: String,
    fields: Vec<JoinedField>,
}

impl JoinedColumns {
    pub fn alias(&self) -> &str {
        &self.alias
    }

    pub fn resolve(&self, name: &str) -> Option<ResolvedField> {
        let snake = to_snake_case(name);
        self.fields
            .iter()
            .find(|field| field.name == name || field.column == snake)
            .map(|field| ResolvedField {
                expr: SimpleExpr::Column(
                    (Alias::new(self.alias.as_str()), Alias::new(field.column.as_str()))
                        .into_column_ref(),
                ),
                kind: field.kind,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{materials, projects, users};

    #[test]
    fn case_conversions() {
        assert_eq!(to_camel_case("created_at"), "createdAt");
        assert_eq!(to_camel_case("manager_id"), "managerId");
        assert_eq!(to_camel_case("type"), "type");
        assert_eq!(to_snake_case("createdAt"), "created_at");
        assert_eq!(to_snake_case("isActive"), "is_active");
    }

    #[test]
    fn user_schema_follows_the_entity() {
        let schema = EntityColumns::<users::Entity>::new().schema();
        assert_eq!(schema.primary_key, "id");
        assert_eq!(schema.kind_of("id"), Some(FieldKind::Uuid));
        assert_eq!(schema.kind_of("name"), Some(FieldKind::Text));
        assert_eq!(schema.kind_of("isActive"), Some(FieldKind::Boolean));
        assert_eq!(schema.kind_of("createdAt"), Some(FieldKind::Date));
        assert_eq!(schema.kind_of("created_at"), None);
    }

    #[test]
    fn numeric_columns_are_classified() {
        let projects = EntityColumns::<projects::Entity>::new().schema();
        assert_eq!(projects.kind_of("budget"), Some(FieldKind::Integer));
        assert_eq!(projects.kind_of("startDate"), Some(FieldKind::Date));

        let materials = EntityColumns::<materials::Entity>::new().schema();
        assert_eq!(materials.kind_of("unitPrice"), Some(FieldKind::Float));
        assert_eq!(materials.kind_of("type"), Some(FieldKind::Text));
    }

    #[test]
    fn lookup_accepts_api_and_column_names() {
        let columns = EntityColumns::<users::Entity>::new();
        assert!(columns.resolve("createdAt").is_some());
        assert!(columns.resolve("created_at").is_some());
        assert!(columns.resolve("password").is_none());

        let manager = columns.joined("manager");
        assert_eq!(manager.alias(), "manager");
        assert!(manager.resolve("email").is_some());
        assert!(manager.resolve("isActive").is_some());
        assert!(manager.resolve("salary").is_none());
    }
}
