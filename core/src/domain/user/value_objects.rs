use crate::domain::query::RawQuery;

/// Query key carrying a role filter, e.g. `/users/all?role=project+manager`.
pub const ROLE_PARAM: &str = "role";

#[derive(Debug, Clone, Default)]
pub struct ListUsersInput {
    pub query: Option<RawQuery>,
}
