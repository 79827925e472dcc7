use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct PromptView {
    pub prompt: String,
    #[serde(rename = "isDefault")]
    pub is_default: bool,
}

#[derive(Debug, Deserialize)]
pub struct PromptUpdate {
    prompt: String,
}

pub async fn current_prompt(State(state): State<Arc<AppState>>) -> Json<PromptView> {
    Json(PromptView {
        prompt: state.prompts.get(),
        is_default: state.prompts.is_default(),
    })
}

pub async fn save_prompt(
    State(state): State<Arc<AppState>>,
    body: Option<Json<PromptUpdate>>,
) -> Result<Json<Value>, ApiError> {
    let Some(Json(update)) = body else {
        return Err(ApiError::invalid_prompt());
    };
    state.prompts.set(&update.prompt).map_err(|err| {
        tracing::error!("failed to save system prompt: {err}");
        ApiError::Internal("Failed to save system prompt")
    })?;
    Ok(Json(json!({ "success": true })))
}

pub async fn reset_prompt(State(state): State<Arc<AppState>>) -> Result<Json<Value>, ApiError> {
    state.prompts.reset().map_err(|err| {
        tracing::error!("failed to reset system prompt: {err}");
        ApiError::Internal("Failed to reset system prompt")
    })?;
    Ok(Json(json!({ "success": true })))
}
