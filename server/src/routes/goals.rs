use api::goals::{Goal, GoalPatch, NewGoal};
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use uuid::Uuid;

use crate::application::AppState;
use crate::error::{bad_body, internal, AppError};
use crate::extract::AuthUser;

pub async fn list(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<Vec<Goal>>, AppError> {
    state
        .goals
        .list(user)
        .await
        .map(Json)
        .map_err(internal("Error fetching goals"))
}

pub async fn create(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    body: Result<Json<NewGoal>, JsonRejection>,
) -> Result<Json<Goal>, AppError> {
    let Json(body) = body.map_err(|_| bad_body("Title and a valid deadline are required"))?;
    state
        .goals
        .create(user, body)
        .await
        .map(Json)
        .map_err(internal("Error creating goal"))
}

pub async fn update(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
    body: Result<Json<GoalPatch>, JsonRejection>,
) -> Result<Json<Option<Goal>>, AppError> {
    let Json(body) = body.map_err(|_| bad_body("Invalid goal update"))?;
    // An id that is not even a UUID cannot name an existing goal; answer the
    // same way as any other miss.
    let Ok(id) = id.parse::<Uuid>() else {
        return Ok(Json(None));
    };
    state
        .goals
        .update(user, id, body)
        .await
        .map(Json)
        .map_err(internal("Error updating goal"))
}

pub async fn remove(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(id): Path<String>,
) -> Result<Json<Value>, AppError> {
    if let Ok(id) = id.parse::<Uuid>() {
        state
            .goals
            .delete(user, id)
            .await
            .map_err(internal("Error deleting goal"))?;
    }
    Ok(Json(json!({ "message": "Deleted" })))
}
