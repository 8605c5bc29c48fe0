use uuid::Uuid;

use crate::errors::AppError;

/// Parses a path identifier, reporting the offending value when malformed.
pub fn valid_uuid(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::InvalidId(id.to_string()))
}
