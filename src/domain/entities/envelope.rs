use serde::{Deserialize, Serialize};

use crate::entities::query::Pagination;

/// Success envelope shared by every resource endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        ApiResponse { success: true, message: None, data, pagination: None }
    }

    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        ApiResponse { success: true, message: Some(message.into()), data, pagination: None }
    }

    pub fn paginated(data: T, pagination: Pagination) -> Self {
        ApiResponse { success: true, message: None, data, pagination: Some(pagination) }
    }
}
