pub mod achievement;
pub mod certification;
pub mod envelope;
pub mod project;
pub mod query;
pub mod resource;
pub mod token;
