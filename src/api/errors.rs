use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::error::AppError;
use crate::models::forms::ActionResponse;

/// Converts AppError into the `{ success: false, error }` JSON body every
/// endpoint fails with.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Duplicate(msg) => (StatusCode::CONFLICT, msg.clone()),
            // The store failure itself was logged where it was wrapped.
            AppError::Upstream { message, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, message.clone())
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Something went wrong. Please try again later.".to_string(),
                )
            }
        };

        (status, Json(ActionResponse::failed(message))).into_response()
    }
}
