use api::vault::{NewVaultItem, VaultItem};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use crate::application::AppState;
use crate::error::{bad_body, internal, AppError};
use crate::extract::AuthUser;

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<VaultItem>>, AppError> {
    state
        .vault
        .list(user)
        .await
        .map(Json)
        .map_err(internal("Error fetching items"))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<NewVaultItem>, JsonRejection>,
) -> Result<(StatusCode, Json<VaultItem>), AppError> {
    let Json(body) = body.map_err(|_| bad_body("URL and Type are required."))?;
    let item = state
        .vault
        .create(user, body)
        .await
        .map_err(internal("Error saving vault item"))?;
    Ok((StatusCode::CREATED, Json(item)))
}
