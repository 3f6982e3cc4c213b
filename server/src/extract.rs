use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header;
use axum::http::request::Parts;
use uuid::Uuid;

use crate::application::AppState;
use crate::error::AppError;

/// The authenticated caller. Extracting this runs the bearer-token check,
/// so a handler that takes an `AuthUser` can never touch a store before the
/// token has been validated; a missing or invalid token short-circuits with
/// 401/403 here.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());
        let user = state.auth.authenticate(authorization).await?;
        Ok(AuthUser(user))
    }
}
