pub mod compiled_query;
pub mod errors;
