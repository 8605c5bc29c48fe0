use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::{entities::token::Claims, errors::AuthError};

/// Claims of an authenticated administrator.
/// Returns 401 when no valid token was presented and 403 when the token is
/// not an admin token. Add `claims: AdminClaims` to a handler to require it.
#[derive(Debug)]
pub struct AdminClaims(pub Claims);

impl FromRequest for AdminClaims {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        match req.extensions().get::<Claims>() {
            Some(claims) if claims.admin => ready(Ok(AdminClaims(claims.clone()))),
            Some(_) => ready(Err(AuthError::Forbidden("Admin access required".into()).into())),
            None => ready(Err(AuthError::MissingCredentials.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test::TestRequest, FromRequest};

    fn claims(admin: bool) -> Claims {
        Claims { sub: "portfolio-owner".into(), admin, exp: usize::MAX, iat: 0 }
    }

    #[actix_rt::test]
    async fn admin_claims_pass() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims(true));
        let extracted = AdminClaims::extract(&req).await.unwrap();
        assert!(extracted.0.admin);
    }

    #[actix_rt::test]
    async fn non_admin_is_forbidden() {
        let req = TestRequest::default().to_http_request();
        req.extensions_mut().insert(claims(false));
        let err = AdminClaims::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::FORBIDDEN);
    }

    #[actix_rt::test]
    async fn missing_claims_are_unauthorized() {
        let req = TestRequest::default().to_http_request();
        let err = AdminClaims::extract(&req).await.unwrap_err();
        assert_eq!(err.as_response_error().status_code(), StatusCode::UNAUTHORIZED);
    }
}
