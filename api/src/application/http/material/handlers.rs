pub mod list_materials;
