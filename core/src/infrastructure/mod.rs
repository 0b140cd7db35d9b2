pub mod db;
pub mod health;
pub mod material;
pub mod project;
pub mod query;
pub mod user;
