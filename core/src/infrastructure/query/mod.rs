//! Translation of compiled list queries into sea-orm selects.

pub mod columns;
pub mod condition;

pub use columns::{EntityColumns, JoinedColumns};
pub use condition::{QueryTarget, fetch_page};
