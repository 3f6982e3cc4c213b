//! Bearer tokens: opaque signed strings with an expiry (JWT, HS256).
//!
//! Claims carry only the user id (`sub`) and the issued-at/expiry pair.
//! There is no refresh or rotation flow; a token is valid until `exp`.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the user id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

/// Sign a token for `user_id`, valid for `ttl` from now.
pub fn issue(user_id: Uuid, secret: &str, ttl: Duration) -> Result<String, ApiError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        iat: now.timestamp(),
        exp: (now + ttl).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(format!("failed to sign token: {e}")))
}

/// Check signature and expiry, returning the embedded user id. Any failure
/// collapses to [`ApiError::InvalidToken`]; the caller never learns whether
/// the signature or the expiry was at fault.
pub fn verify(token: &str, secret: &str) -> Result<Uuid, ApiError> {
    let mut validation = Validation::default();
    validation.leeway = 0;
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::InvalidToken)?;
    Uuid::parse_str(&data.claims.sub).map_err(|_| ApiError::InvalidToken)
}

/// Pull the token out of an `Authorization` header value. An absent header
/// and a header that is not `Bearer <token>` are distinct failures (401 vs
/// 403 at the HTTP surface).
pub fn bearer(authorization: Option<&str>) -> Result<&str, ApiError> {
    let header = authorization.ok_or(ApiError::MissingToken)?;
    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::InvalidToken)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    #[test]
    fn test_issue_then_verify() {
        let user = Uuid::new_v4();
        let token = issue(user, SECRET, Duration::hours(1)).unwrap();
        assert_eq!(verify(&token, SECRET).unwrap(), user);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let token = issue(Uuid::new_v4(), SECRET, Duration::hours(1)).unwrap();
        assert!(matches!(
            verify(&token, "other-secret"),
            Err(ApiError::InvalidToken)
        ));
    }

    #[test]
    fn test_expired_token_rejected() {
        let token = issue(Uuid::new_v4(), SECRET, Duration::hours(-1)).unwrap();
        assert!(matches!(verify(&token, SECRET), Err(ApiError::InvalidToken)));
    }

    #[test]
    fn test_bearer_header_parsing() {
        assert!(matches!(bearer(None), Err(ApiError::MissingToken)));
        assert!(matches!(bearer(Some("Basic abc")), Err(ApiError::InvalidToken)));
        assert!(matches!(bearer(Some("Bearer ")), Err(ApiError::InvalidToken)));
        assert_eq!(bearer(Some("Bearer abc.def.ghi")).unwrap(), "abc.def.ghi");
    }
}
