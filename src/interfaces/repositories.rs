pub mod achievement;
pub mod certification;
pub mod memory;
pub mod project;
pub mod resource;
pub mod sqlx_repo;
