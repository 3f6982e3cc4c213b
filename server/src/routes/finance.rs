use api::finance::{FinanceEntry, NewFinanceEntry};
use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use crate::application::AppState;
use crate::error::{bad_body, internal, AppError};
use crate::extract::AuthUser;

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<FinanceEntry>>, AppError> {
    state
        .finance
        .list(user)
        .await
        .map(Json)
        .map_err(internal("Failed to fetch transactions"))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<NewFinanceEntry>, JsonRejection>,
) -> Result<Json<FinanceEntry>, AppError> {
    let Json(body) = body.map_err(|_| bad_body("Type, amount, and category are required"))?;
    state
        .finance
        .create(user, body)
        .await
        .map(Json)
        .map_err(internal("Failed to log transaction"))
}
