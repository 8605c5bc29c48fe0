use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, Header, TokenData, Validation};

use crate::entities::token::Claims;
use crate::errors::AuthError;
use crate::settings::{AppConfig, JwtKeys};

const JWT_ALGORITHM: Algorithm = Algorithm::HS512;

#[derive(Clone)]
pub struct JwtService {
    keys: JwtKeys,
    expiration: Duration,
}

impl JwtService {
    pub fn new(config: &AppConfig) -> Self {
        JwtService {
            keys: JwtKeys::from(config),
            expiration: Duration::minutes(config.jwt_expiration_minutes),
        }
    }

    /// Signs a token valid for the configured expiration.
    pub fn issue_token(&self, subject: &str, admin: bool) -> Result<String, AuthError> {
        self.issue_token_with_ttl(subject, admin, self.expiration)
    }

    pub fn issue_token_with_ttl(&self, subject: &str, admin: bool, ttl: Duration) -> Result<String, AuthError> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject.to_string(),
            admin,
            exp: (now + ttl).timestamp().max(0) as usize,
            iat: now.timestamp() as usize,
        };

        encode(&Header::new(JWT_ALGORITHM), &claims, &self.keys.encoding)
            .map_err(|_| AuthError::TokenCreation)
    }

    pub fn decode_jwt(&self, token: &str) -> Result<TokenData<Claims>, AuthError> {
        let mut validation = Validation::new(JWT_ALGORITHM);
        validation.validate_exp = true;
        validation.leeway = 0;

        decode::<Claims>(token, &self.keys.decoding, &validation).map_err(AuthError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(secret: &str) -> JwtService {
        let config = AppConfig {
            jwt_secret: secret.to_string(),
            ..AppConfig::default()
        };
        JwtService::new(&config)
    }

    #[test]
    fn issued_token_decodes_with_same_secret() {
        let jwt = service("a-very-long-secret-used-only-in-tests!!");
        let token = jwt.issue_token("portfolio-owner", true).unwrap();
        let claims = jwt.decode_jwt(&token).unwrap().claims;
        assert_eq!(claims.sub, "portfolio-owner");
        assert!(claims.admin);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let token = service("a-very-long-secret-used-only-in-tests!!")
            .issue_token("portfolio-owner", true)
            .unwrap();
        let err = service("another-long-secret-used-only-in-tests!")
            .decode_jwt(&token)
            .unwrap_err();
        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = service("a-very-long-secret-used-only-in-tests!!");
        let token = jwt
            .issue_token_with_ttl("portfolio-owner", true, Duration::minutes(-5))
            .unwrap();
        assert!(matches!(jwt.decode_jwt(&token).unwrap_err(), AuthError::TokenExpired));
    }

    #[test]
    fn garbage_is_invalid() {
        let jwt = service("a-very-long-secret-used-only-in-tests!!");
        assert!(matches!(jwt.decode_jwt("not.a.token").unwrap_err(), AuthError::InvalidToken));
    }
}
