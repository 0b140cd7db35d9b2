pub mod health;
pub mod material;
pub mod project;
pub mod query_extractor;
pub mod query_params;
pub mod server;
pub mod user;
