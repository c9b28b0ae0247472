use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

/// Error type for the web surface itself (bad requests, unknown routes).
/// Submission failures never surface here; they are rendered into the page.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Validation(msg) => {
                tracing::warn!("Rejected request: {msg}");
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Why a submission ended without a prediction. Both kinds are recoverable:
/// the user can submit again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SubmissionError {
    /// The service answered with a failure status.
    #[error("{message}")]
    Application {
        message: String,
        details: Option<Value>,
    },

    /// No usable response: the request failed or the body could not be read.
    #[error("Could not connect to the prediction server at {endpoint}: {description}")]
    Transport {
        description: String,
        endpoint: String,
    },
}
