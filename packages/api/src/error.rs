use store::StoreError;
use thiserror::Error;

/// Domain error taxonomy. The server crate maps these onto HTTP statuses:
/// validation → 400, missing token and bad credentials → 401, invalid or
/// expired token → 403, not found → 404, internal → 500.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A required field is missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// No `Authorization` header on a protected route.
    #[error("No token provided")]
    MissingToken,

    /// The bearer token is malformed, tampered with, or expired.
    #[error("Invalid token")]
    InvalidToken,

    /// Unknown email or wrong password. Deliberately one message for both.
    #[error("Invalid email or password")]
    BadCredentials,

    #[error("{0}")]
    NotFound(String),

    /// Persistence or hashing failure. The message is internal detail; the
    /// server substitutes a generic per-route message before responding.
    #[error("{0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        ApiError::Internal(err.to_string())
    }
}
