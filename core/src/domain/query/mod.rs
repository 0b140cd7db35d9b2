pub mod entities;
pub mod helpers;
pub mod normalizers;
pub mod services;
pub mod value_objects;

pub use entities::{compiled_query::CompiledQuery, errors::QueryError};
pub use services::compile_query;
pub use value_objects::{
    AssociationDescriptor, FieldDescriptor, FieldKind, ModelRef, ModelSchema, Paginated,
    QueryValue, RawQuery,
};
