use api::ApiError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Response-side wrapper for [`ApiError`]. Every error leaves the server as
/// `{"message": "..."}` with the status the taxonomy dictates.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::MissingToken | ApiError::BadCredentials => StatusCode::UNAUTHORIZED,
            ApiError::InvalidToken => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(json!({ "message": self.0.to_string() }))).into_response()
    }
}

/// Squash internal failure detail down to this route's public message,
/// logging the detail first. Other error kinds pass through untouched.
pub fn internal(public: &'static str) -> impl FnOnce(ApiError) -> AppError {
    move |err| match err {
        ApiError::Internal(detail) => {
            tracing::error!(%detail, "request failed");
            AppError(ApiError::Internal(public.to_string()))
        }
        other => AppError(other),
    }
}

/// The 400 for a body that could not even be parsed into the route's
/// request schema.
pub fn bad_body(message: &'static str) -> AppError {
    AppError(ApiError::Validation(message.to_string()))
}
