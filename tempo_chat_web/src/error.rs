use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// What a handler is allowed to tell the caller when something goes wrong:
/// a short static message, either as a 400 (their fault) or a 500 (ours).
/// Underlying causes are logged at the boundary and never serialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiError {
    Validation(&'static str),
    Internal(&'static str),
}

impl ApiError {
    pub fn invalid_messages() -> Self {
        Self::Validation("Invalid messages format")
    }

    pub fn invalid_prompt() -> Self {
        Self::Validation("Invalid prompt format")
    }

    pub fn chat_failed() -> Self {
        Self::Internal("Failed to process chat request")
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::Validation(message) => (StatusCode::BAD_REQUEST, message),
            ApiError::Internal(message) => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
