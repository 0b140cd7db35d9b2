use crate::domain::query::{AssociationDescriptor, ModelRef, RawQuery};

/// Query key carrying a status filter, e.g. `?statusFilter=new,in+progress`.
pub const STATUS_PARAM: &str = "statusFilter";

/// Alias under which the managing user is joined.
pub const MANAGER_ALIAS: &str = "manager";

#[derive(Debug, Clone, Default)]
pub struct ListProjectsInput {
    pub query: Option<RawQuery>,
}

/// Joined models that take part in project sort and search.
pub fn project_associations() -> Vec<AssociationDescriptor> {
    vec![AssociationDescriptor::new(
        MANAGER_ALIAS,
        ModelRef::new("users"),
        &["name", "email"],
    )]
}
