use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::common::CoreError;

/// Maps the core failure taxonomy onto HTTP status codes.
///
/// Database failures are logged here and returned as an opaque 500; every
/// other variant carries a message safe to show the caller.
pub struct ApiError(CoreError);

impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        Self(err)
    }
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            CoreError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            CoreError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            CoreError::Conflict(_) => (StatusCode::CONFLICT, self.0.to_string()),
            CoreError::InvalidState(_) => (StatusCode::UNPROCESSABLE_ENTITY, self.0.to_string()),
            CoreError::Database(err) => {
                tracing::error!(error = %err, "database failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
