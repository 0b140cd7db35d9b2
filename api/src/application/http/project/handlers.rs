pub mod list_projects;
