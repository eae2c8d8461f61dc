//! Error types for the intentdash server.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Errors that can occur while serving requests.
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Missing '{0}' query parameter")]
    MissingParameter(&'static str),

    #[error("Project not found: {0}")]
    ProjectNotFound(String),

    #[error("LLM relay error: {0}")]
    LlmRelay(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServerError::MissingParameter(_) => StatusCode::BAD_REQUEST,
            ServerError::ProjectNotFound(_) => StatusCode::NOT_FOUND,
            ServerError::LlmRelay(_) => StatusCode::BAD_GATEWAY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

/// Result type alias for handler operations.
pub type ServerResult<T> = Result<T, ServerError>;
