//! Error handling

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub type AppResult<T> = Result<T, AppError>;

/// Errors visible to intake callers. Only malformed input ever gets here;
/// downstream integration failures are absorbed inside the pipeline.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Body is not parseable as a telemetry event
    #[error("Invalid input format: {0}")]
    MalformedPayload(String),

    /// Body parsed but fails structural validation
    #[error("Invalid telemetry event: {0}")]
    ValidationError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::MalformedPayload(_) | AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
        };

        tracing::warn!("Rejected telemetry event: {}", self);

        let body = Json(json!({
            "error": self.to_string(),
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::MalformedPayload(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::ValidationError(errors.to_string())
    }
}
