//! Case and separator insensitive normalization of enum-like filter values.
//!
//! Normalizers are permissive: unknown values come back canonicalized as
//! well as possible instead of being rejected. Validity is enforced by the
//! schema (see the `users_role_check` constraint).

use crate::domain::query::{
    entities::compiled_query::{FieldRef, Predicate, PredicateValue},
    value_objects::QueryValue,
};

pub const ROLE_ADMIN: &str = "Admin";
pub const ROLE_TECHNICIAN: &str = "Technician";
pub const ROLE_PROJECT_MANAGER: &str = "Project Manager";

/// Canonical values accepted by the `users.role` column.
pub const ROLES: [&str; 3] = [ROLE_ADMIN, ROLE_TECHNICIAN, ROLE_PROJECT_MANAGER];

/// Enum domains that have a dedicated normalizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnumKind {
    Role,
    Status,
    Type,
    Other,
}

fn title_case(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn role_alias(title_cased: &str) -> Option<&'static str> {
    match title_cased {
        "Admin" => Some(ROLE_ADMIN),
        "Technician" => Some(ROLE_TECHNICIAN),
        "Project Manager" | "Projectmanager" => Some(ROLE_PROJECT_MANAGER),
        _ => None,
    }
}

fn status_alias(lower_cased: &str) -> Option<&'static str> {
    match lower_cased {
        "new" => Some("New"),
        "in progress" | "inprogress" => Some("In Progress"),
        "pm review" | "pmreview" => Some("PM Review"),
        "complete" => Some("Complete"),
        _ => None,
    }
}

/// `project_manager`, `PROJECT+MANAGER`, `projectmanager` -> `Project Manager`.
///
/// Unknown roles fall back to their Title Case spelling.
pub fn normalize_role(role: &str) -> String {
    if role.is_empty() {
        return String::new();
    }

    let title_cased = role
        .to_lowercase()
        .replace(['+', '_'], " ")
        .split_whitespace()
        .map(title_case)
        .collect::<Vec<String>>()
        .join(" ");

    match role_alias(&title_cased) {
        Some(canonical) => canonical.to_string(),
        None => title_cased,
    }
}

fn normalize_status_value(status: &str) -> String {
    status_alias(&status.to_lowercase())
        .map(str::to_string)
        .unwrap_or_else(|| status.to_string())
}

/// Maps known status spellings to their stored form, leaving unknown
/// entries untouched. Sequences keep their order and length.
pub fn normalize_status(status: &QueryValue) -> QueryValue {
    match status {
        QueryValue::Scalar(value) if value.is_empty() => status.clone(),
        QueryValue::Scalar(value) => QueryValue::Scalar(normalize_status_value(value)),
        QueryValue::Sequence(values) => QueryValue::Sequence(
            values
                .iter()
                .map(|value| normalize_status_value(value))
                .collect(),
        ),
    }
}

/// Material types are stored lower-cased.
pub fn normalize_type(kind: &str) -> String {
    kind.to_lowercase()
}

fn map_each(value: &QueryValue, normalize: fn(&str) -> String) -> QueryValue {
    match value {
        QueryValue::Scalar(value) => QueryValue::Scalar(normalize(value)),
        QueryValue::Sequence(values) => {
            QueryValue::Sequence(values.iter().map(|value| normalize(value)).collect())
        }
    }
}

/// Builds `field = value` (or `field IN (...)` for sequences) after
/// normalizing `value` for its enum domain. Empty values yield no predicate.
pub fn create_case_insensitive_filter(
    field: &str,
    value: &QueryValue,
    kind: EnumKind,
) -> Option<Predicate> {
    if value.is_empty() {
        return None;
    }

    let normalized = match kind {
        EnumKind::Role => map_each(value, normalize_role),
        EnumKind::Status => normalize_status(value),
        EnumKind::Type => map_each(value, normalize_type),
        EnumKind::Other => value.clone(),
    };

    let predicate = match normalized {
        QueryValue::Scalar(value) => {
            Predicate::eq(FieldRef::column(field), PredicateValue::Text(value))
        }
        QueryValue::Sequence(values) => Predicate::is_in(
            FieldRef::column(field),
            values.into_iter().map(PredicateValue::Text).collect(),
        ),
    };

    Some(predicate)
}
