use actix_web::{error::JsonPayloadError, http::StatusCode, web};

use crate::errors::AppError;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::from(err).into()
    }));
}

impl From<JsonPayloadError> for AppError {
    fn from(err: JsonPayloadError) -> Self {
        tracing::debug!("Rejected request body: {}", err);
        AppError::operational(StatusCode::BAD_REQUEST, "Invalid JSON payload")
            .with_details(serde_json::Value::String(err.to_string()))
    }
}
