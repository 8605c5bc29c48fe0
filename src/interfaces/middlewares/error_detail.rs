use actix_web::{
    body::MessageBody,
    dev::ServiceResponse,
    http::StatusCode,
    middleware::{ErrorHandlerResponse, ErrorHandlers},
    HttpResponse,
};

use crate::errors::AppError;

/// Adds the raw failure text as `error` to 500 responses raised by
/// [`AppError::Internal`]. Only mounted outside production.
pub fn expose_internal_errors<B: MessageBody + 'static>() -> ErrorHandlers<B> {
    ErrorHandlers::new().handler(StatusCode::INTERNAL_SERVER_ERROR, attach_error_detail)
}

fn attach_error_detail<B: MessageBody + 'static>(
    res: ServiceResponse<B>,
) -> actix_web::Result<ErrorHandlerResponse<B>> {
    let raw = res
        .response()
        .error()
        .and_then(|e| e.as_error::<AppError>())
        .and_then(|e| match e {
            AppError::Internal(raw) => Some(raw.clone()),
            _ => None,
        });
    let Some(raw) = raw else {
        return Ok(ErrorHandlerResponse::Response(res.map_into_left_body()));
    };

    let mut body = AppError::Internal(raw.clone()).envelope();
    body["error"] = serde_json::Value::String(raw);

    let (req, _) = res.into_parts();
    let response = HttpResponse::InternalServerError().json(body);
    Ok(ErrorHandlerResponse::Response(
        ServiceResponse::new(req, response).map_into_right_body(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App};

    async fn failing() -> Result<HttpResponse, AppError> {
        Err(AppError::Internal("pool timed out".into()))
    }

    async fn missing() -> Result<HttpResponse, AppError> {
        Err(AppError::NotFound("Project"))
    }

    #[actix_rt::test]
    async fn internal_errors_carry_raw_detail() {
        let app = test::init_service(
            App::new()
                .wrap(expose_internal_errors())
                .route("/boom", web::get().to(failing))
                .route("/missing", web::get().to(missing)),
        )
        .await;

        let body: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], crate::errors::INTERNAL_ERROR_MESSAGE);
        assert_eq!(body["error"], "pool timed out");

        let body: serde_json::Value =
            test::call_and_read_body_json(&app, test::TestRequest::get().uri("/missing").to_request()).await;
        assert!(body.get("error").is_none());
    }
}
