pub mod extractors;
pub mod resources;
