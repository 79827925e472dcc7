use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use assist::chat::ChatTurn;

use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ChatStatus {
    pub status: &'static str,
    pub model: String,
    pub timestamp: DateTime<Utc>,
}

/// Health probe for the chat boundary.
pub async fn chat_status(State(state): State<Arc<AppState>>) -> Json<ChatStatus> {
    Json(ChatStatus {
        status: "Chat API is running",
        model: state.completions.model().to_string(),
        timestamp: Utc::now(),
    })
}

/// The one real contract: validate the caller's turn list, prepend the
/// current system prompt, run one completion, answer with the reply text.
/// Gateway failures become a generic 500; the cause only goes to the log.
pub async fn chat_completion(
    State(state): State<Arc<AppState>>,
    body: Option<Json<Value>>,
) -> Result<Json<ChatReply>, ApiError> {
    let Some(Json(body)) = body else {
        return Err(ApiError::invalid_messages());
    };
    let turns = parse_turns(&body)?;

    let mut outbound = Vec::with_capacity(turns.len() + 1);
    outbound.push(ChatTurn::system(state.prompts.get()));
    outbound.extend(turns);

    match state.completions.complete(&outbound).await {
        Ok(message) => Ok(Json(ChatReply {
            message,
            timestamp: Utc::now(),
        })),
        Err(err) => {
            tracing::error!("chat completion failed: {err}");
            Err(ApiError::chat_failed())
        }
    }
}

fn parse_turns(body: &Value) -> Result<Vec<ChatTurn>, ApiError> {
    let messages = body
        .get("messages")
        .filter(|value| value.is_array())
        .ok_or_else(ApiError::invalid_messages)?;
    serde_json::from_value(messages.clone()).map_err(|_| ApiError::invalid_messages())
}

#[cfg(test)]
mod tests {
    use crate::testing::{app_with, mock_app, post_json, response_json, StubCompletions};
    use assist::prompt::{MemoryPromptStore, PromptStore, DEFAULT_SYSTEM_PROMPT};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::json;
    use std::sync::Arc;
    use tower::ServiceExt;

    #[tokio::test]
    async fn missing_messages_is_a_validation_error() {
        let response = post_json(mock_app(), "/api/chat", json!({ "prompt": "Hi" })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = response_json(response).await;
        assert_eq!(body["error"], "Invalid messages format");
    }

    #[tokio::test]
    async fn non_array_messages_is_a_validation_error() {
        let response = post_json(mock_app(), "/api/chat", json!({ "messages": "Hi" })).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn unknown_role_is_a_validation_error() {
        let body = json!({ "messages": [{ "role": "robot", "content": "Hi" }] });
        let response = post_json(mock_app(), "/api/chat", body).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn reply_carries_message_and_timestamp() {
        let body = json!({ "messages": [{ "role": "user", "content": "Hi" }] });
        let response = post_json(mock_app(), "/api/chat", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["message"], "Hello!");
        assert!(body["timestamp"].as_str().unwrap().contains('T'));
    }

    #[tokio::test]
    async fn system_turn_is_prepended_with_default_prompt() {
        let completions = StubCompletions::replying("Hello!");
        let app = app_with(completions.clone(), Arc::new(MemoryPromptStore::new()));

        let body = json!({ "messages": [{ "role": "user", "content": "Hi" }] });
        let response = post_json(app, "/api/chat", body).await;
        assert_eq!(response.status(), StatusCode::OK);

        let seen = completions.seen.lock().unwrap();
        assert_eq!(seen[0][0].role, assist::chat::Role::System);
        assert_eq!(seen[0][0].content, DEFAULT_SYSTEM_PROMPT);
        assert_eq!(seen[0][1].content, "Hi");
    }

    #[tokio::test]
    async fn saved_prompt_override_reaches_the_gateway() {
        let completions = StubCompletions::replying("Hello!");
        let prompts = Arc::new(MemoryPromptStore::new());
        prompts.set("Answer in haiku.").unwrap();
        let app = app_with(completions.clone(), prompts);

        let body = json!({ "messages": [{ "role": "user", "content": "Hi" }] });
        post_json(app, "/api/chat", body).await;

        let seen = completions.seen.lock().unwrap();
        assert_eq!(seen[0][0].content, "Answer in haiku.");
    }

    #[tokio::test]
    async fn gateway_failure_is_a_generic_internal_error() {
        let app = app_with(
            StubCompletions::failing(),
            Arc::new(MemoryPromptStore::new()),
        );
        let body = json!({ "messages": [{ "role": "user", "content": "Hi" }] });
        let response = post_json(app, "/api/chat", body).await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = response_json(response).await;
        assert_eq!(body["error"], "Failed to process chat request");
    }

    #[tokio::test]
    async fn health_probe_reports_model() {
        let response = mock_app()
            .oneshot(
                Request::builder()
                    .uri("/api/chat")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = response_json(response).await;
        assert_eq!(body["status"], "Chat API is running");
        assert_eq!(body["model"], "stub-model");
    }
}
