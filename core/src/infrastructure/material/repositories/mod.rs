pub mod material_repository;
