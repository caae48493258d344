// src/middleware/auth_extractor.rs - bearer token -> authenticated user
use actix_web::error::{ErrorInternalServerError, ErrorUnauthorized};
use actix_web::{Error, FromRequest, HttpRequest, dev::Payload, web};
use futures::future::{Ready, ready};
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use log::{debug, error};
use uuid::Uuid;

use crate::models::user::JwtClaims;

/// Secret used to verify access tokens issued by the identity provider.
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
}

/// Caller whose bearer token verified. Use `Option<AuthenticatedUser>`
/// for routes that also serve anonymous viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = Error;
    type Future = Ready<Result<AuthenticatedUser, Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let Some(config) = req.app_data::<web::Data<AuthConfig>>() else {
            error!("AuthConfig missing from app data");
            return ready(Err(ErrorInternalServerError("auth not configured")));
        };

        let auth_header = match req.headers().get("Authorization") {
            Some(header) => match header.to_str() {
                Ok(h) => h,
                Err(_) => return ready(Err(ErrorUnauthorized("Invalid header format"))),
            },
            None => return ready(Err(ErrorUnauthorized("Missing Authorization header"))),
        };

        let Some(token) = auth_header.strip_prefix("Bearer ") else {
            return ready(Err(ErrorUnauthorized("Invalid auth header format")));
        };

        match verify_token(token.trim(), &config.jwt_secret) {
            Ok(user_id) => ready(Ok(AuthenticatedUser { user_id })),
            Err(e) => {
                debug!("rejected bearer token: {}", e);
                ready(Err(ErrorUnauthorized("Invalid token")))
            }
        }
    }
}

/// Verifies signature and expiry, returning the subject as a user id.
pub fn verify_token(token: &str, secret: &str) -> Result<Uuid, String> {
    let validation = Validation::new(Algorithm::HS256);
    let data = decode::<JwtClaims>(token, &DecodingKey::from_secret(secret.as_bytes()), &validation)
        .map_err(|e| format!("jwt error: {}", e))?;

    Uuid::parse_str(&data.claims.sub).map_err(|e| format!("Invalid UUID: {}", e))
}
