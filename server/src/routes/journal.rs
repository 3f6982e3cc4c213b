use api::journal::{JournalEntry, NewJournalEntry};
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
) -> Result<Json<Vec<JournalEntry>>, AppError> {
    state
        .journal
        .list(user)
        .await
        .map(Json)
        .map_err(internal("Failed to fetch entries"))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<NewJournalEntry>, JsonRejection>,
) -> Result<(StatusCode, Json<JournalEntry>), AppError> {
    let Json(body) = body.map_err(|_| bad_body("Text and mood required"))?;
    let entry = state
        .journal
        .create(user, body)
        .await
        .map_err(internal("Failed to save entry"))?;
    Ok((StatusCode::CREATED, Json(entry)))
}
