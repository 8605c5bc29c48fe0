pub mod valid_url;
pub mod valid_uuid;
