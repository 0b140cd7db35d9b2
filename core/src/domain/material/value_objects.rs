use crate::domain::query::RawQuery;

/// Query key carrying a material type filter, e.g. `?type=STANDARD`.
pub const TYPE_PARAM: &str = "type";

#[derive(Debug, Clone, Default)]
pub struct ListMaterialsInput {
    pub query: Option<RawQuery>,
}
