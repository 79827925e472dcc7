use assist::chat::ChatTurn;
use assist::gateway::{Completions, GatewayError};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

// Fixed generation parameters; the service does not expose per-request tuning.
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: String,
}

/// Posts one chat-completion request to a remote OpenAI-style endpoint and
/// extracts the first choice. One call per `complete`: no retry, no timeout
/// beyond the transport's own, no caching.
pub struct HttpCompletionGateway {
    http: reqwest::Client,
    endpoint: String,
    api_key: Option<String>,
    model: String,
}

impl HttpCompletionGateway {
    pub fn new(endpoint: String, api_key: Option<String>, model: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
            api_key,
            model,
        }
    }
}

#[async_trait]
impl Completions for HttpCompletionGateway {
    fn model(&self) -> &str {
        &self.model
    }

    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, GatewayError> {
        let body = json!({
            "model": self.model,
            "messages": turns,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });

        let mut request = self.http.post(&self.endpoint).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|err| GatewayError::Transport(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayError::Status(status.as_u16()));
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|err| GatewayError::MalformedBody(err.to_string()))?;

        first_reply(completion)
    }
}

fn first_reply(completion: CompletionResponse) -> Result<String, GatewayError> {
    completion
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .ok_or(GatewayError::NoChoices)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_reply_takes_first_choice() {
        let completion: CompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"content":"Hello!"}},{"message":{"content":"ignored"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_reply(completion).unwrap(), "Hello!");
    }

    #[test]
    fn empty_choices_is_an_error() {
        let completion: CompletionResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_reply(completion),
            Err(GatewayError::NoChoices)
        ));
    }

    #[test]
    fn missing_choices_field_is_an_error_not_a_parse_failure() {
        let completion: CompletionResponse = serde_json::from_str(r#"{"id":"cmpl-1"}"#).unwrap();
        assert!(matches!(
            first_reply(completion),
            Err(GatewayError::NoChoices)
        ));
    }

    #[test]
    fn request_body_carries_fixed_parameters() {
        let turns = vec![ChatTurn::system("be helpful")];
        let body = json!({
            "model": "openrouter/claude-sonnet-4",
            "messages": turns,
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        });
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 4000);
        assert_eq!(body["messages"][0]["role"], "system");
    }
}
