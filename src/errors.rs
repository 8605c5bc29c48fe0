use std::borrow::Cow;
use std::fmt;

use actix_web::{
    error::ResponseError,
    http::{header::ContentType, StatusCode},
    HttpResponse
};
use derive_more::Display;
use jsonwebtoken::errors::{ErrorKind, Error as JwtError};
use serde::Serialize;
use serde_json::Value;
use validator::ValidationErrors;

pub const INTERNAL_ERROR_MESSAGE: &str = "Something went wrong on the server";

#[derive(Debug)]
pub enum AppError {
    /// Schema or storage-level validation failure, one entry per violation.
    Validation(Vec<FieldError>),
    /// A unique field already holds the submitted value.
    Duplicate { field: String },
    /// The path identifier is not a well-formed id.
    InvalidId(String),
    /// No document of the named resource matches the identifier.
    NotFound(&'static str),
    /// Raised deliberately by application logic.
    Operational {
        status: StatusCode,
        message: String,
        details: Option<Value>,
    },
    Internal(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(errors) => {
                let messages = errors.iter()
                    .map(|e| format!("{}: {}", e.field, e.message))
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "validation error: {}", messages)
            }
            AppError::Duplicate { field } => write!(f, "duplicate value for {}", field),
            AppError::InvalidId(value) => write!(f, "invalid id: {}", value),
            AppError::NotFound(resource) => write!(f, "{} not found", resource),
            AppError::Operational { message, .. } => write!(f, "{}", message),
            AppError::Internal(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl AppError {
    pub fn operational(status: StatusCode, message: impl Into<String>) -> Self {
        AppError::Operational { status, message: message.into(), details: None }
    }

    pub fn with_details(self, details: Value) -> Self {
        match self {
            AppError::Operational { status, message, .. } => {
                AppError::Operational { status, message, details: Some(details) }
            }
            other => other,
        }
    }

    /// Envelope body for this error, without any raw internal detail.
    pub fn envelope(&self) -> Value {
        match self {
            AppError::Validation(errors) => serde_json::json!({
                "success": false,
                "message": "Validation Failed",
                "details": errors,
            }),
            AppError::Duplicate { field } => serde_json::json!({
                "success": false,
                "message": "Duplicate field value entered",
                "details": format!("{} already exists", field),
            }),
            AppError::InvalidId(value) => serde_json::json!({
                "success": false,
                "message": "Invalid ID format",
                "details": value,
            }),
            AppError::NotFound(resource) => serde_json::json!({
                "success": false,
                "message": format!("{} not found", resource),
            }),
            AppError::Operational { message, details, .. } => {
                let mut body = serde_json::json!({
                    "success": false,
                    "message": message,
                });
                if let Some(details) = details {
                    body["details"] = details.clone();
                }
                body
            }
            AppError::Internal(_) => serde_json::json!({
                "success": false,
                "message": INTERNAL_ERROR_MESSAGE,
            }),
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let AppError::Internal(msg) = self {
            tracing::error!("Unexpected error: {}", msg);
        }

        HttpResponse::build(self.status_code())
            .insert_header(ContentType::json())
            .json(self.envelope())
    }

    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Duplicate { .. } => StatusCode::BAD_REQUEST,
            AppError::InvalidId(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Operational { status, .. } => *status,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        let mut field_errors: Vec<FieldError> = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errors)| {
                let field = camel_case(field);
                errors.iter().map(move |e| FieldError {
                    field: field.clone(),
                    message: e
                        .message
                        .as_ref()
                        .map(|s| s.to_string())
                        .unwrap_or_else(|| format!("\"{}\" is invalid", field)),
                })
            })
            .collect();
        field_errors.sort_by(|a, b| a.field.cmp(&b.field));

        AppError::Validation(field_errors)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(e) if e.code() == Some(Cow::Borrowed("23505")) => {
                AppError::Duplicate {
                    field: e.constraint().unwrap_or("unknown").to_string(),
                }
            }
            _ => AppError::Internal(format!("Database error: {}", err))
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

#[derive(Debug, Display)]
pub enum AuthError {
    #[display("Invalid token")]
    InvalidToken,

    #[display("Token expired")]
    TokenExpired,

    #[display("Missing credentials")]
    MissingCredentials,

    #[display("Token creation error")]
    TokenCreation,

    #[display("Missing JWT service")]
    MissingJwtService,

    #[display("Forbidden: {_0}")]
    Forbidden(String),
}

impl std::error::Error for AuthError {}

impl ResponseError for AuthError {
    fn error_response(&self) -> HttpResponse {
        let message = match self {
            AuthError::TokenExpired => "Token has expired".to_string(),
            AuthError::MissingCredentials => "Missing or invalid credentials".to_string(),
            AuthError::Forbidden(reason) => reason.clone(),
            _ => self.to_string(),
        };
        HttpResponse::build(self.status_code())
            .json(serde_json::json!({"success": false, "message": message}))
    }

    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::InvalidToken => StatusCode::UNAUTHORIZED,
            AuthError::TokenExpired => StatusCode::UNAUTHORIZED,
            AuthError::MissingCredentials => StatusCode::UNAUTHORIZED,
            AuthError::TokenCreation => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::MissingJwtService => StatusCode::INTERNAL_SERVER_ERROR,
            AuthError::Forbidden(_) => StatusCode::FORBIDDEN,
        }
    }
}

impl From<JwtError> for AuthError {
    fn from(e: JwtError) -> Self {
        match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        FieldError { field: field.into(), message: message.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::body::to_bytes;

    async fn body_of(err: &AppError) -> Value {
        let bytes = to_bytes(err.error_response().into_body()).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[actix_rt::test]
    async fn validation_errors_render_all_details() {
        let err = AppError::Validation(vec![
            FieldError::new("title", "\"title\" is required"),
            FieldError::new("description", "\"description\" is required"),
        ]);

        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        let body = body_of(&err).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Validation Failed");
        assert_eq!(body["details"].as_array().unwrap().len(), 2);
    }

    #[actix_rt::test]
    async fn duplicate_names_the_field() {
        let err = AppError::Duplicate { field: "credentialId".into() };
        let body = body_of(&err).await;
        assert_eq!(body["message"], "Duplicate field value entered");
        assert_eq!(body["details"], "credentialId already exists");
    }

    #[actix_rt::test]
    async fn internal_error_hides_raw_message() {
        let err = AppError::Internal("connection reset by peer".into());
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_of(&err).await;
        assert_eq!(body["message"], INTERNAL_ERROR_MESSAGE);
        assert!(body.get("error").is_none());
    }

    #[actix_rt::test]
    async fn operational_error_keeps_its_status_and_details() {
        let err = AppError::operational(StatusCode::CONFLICT, "Already archived")
            .with_details(serde_json::json!({"id": "abc"}));
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
        let body = body_of(&err).await;
        assert_eq!(body["message"], "Already archived");
        assert_eq!(body["details"]["id"], "abc");
    }

    #[test]
    fn not_found_message_names_resource() {
        let err = AppError::NotFound("Certification");
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(err.envelope()["message"], "Certification not found");
        assert!(err.envelope().get("details").is_none());
    }

    #[test]
    fn snake_case_fields_become_camel_case() {
        assert_eq!(camel_case("image_url"), "imageUrl");
        assert_eq!(camel_case("title"), "title");
        assert_eq!(camel_case("credential_url"), "credentialUrl");
    }
}
