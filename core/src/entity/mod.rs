pub mod materials;
pub mod projects;
pub mod users;
