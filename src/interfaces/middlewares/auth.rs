use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::Method,
    web, Error, HttpMessage, ResponseError,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use crate::{entities::token::Claims, errors::AuthError, AppState};

/// Guards every write under `/api/`: a bearer token is required and it must
/// carry admin claims. Accepted claims are stored in request extensions.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if !is_protected_route(req.path(), req.method()) {
                return service.call(req).await.map(ServiceResponse::map_into_left_body);
            }

            let claims = match get_admin_claims(&req) {
                Ok(claims) => claims,
                Err(err) => {
                    tracing::warn!(
                        method = %req.method(),
                        path = %req.path(),
                        "Write rejected: {}", err
                    );
                    let response = err.error_response();
                    return Ok(req.into_response(response).map_into_right_body());
                }
            };

            req.extensions_mut().insert(claims);
            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

fn is_protected_route(path: &str, method: &Method) -> bool {
    path.starts_with("/api/")
        && matches!(*method, Method::POST | Method::PUT | Method::PATCH | Method::DELETE)
}

fn extract_token(req: &ServiceRequest) -> Option<String> {
    req.headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}

fn get_admin_claims(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;

    let token = extract_token(req).ok_or(AuthError::MissingCredentials)?;
    let claims = state.jwt_service.decode_jwt(&token)?.claims;

    if !claims.admin {
        return Err(AuthError::Forbidden("Admin access required".into()));
    }
    Ok(claims)
}
