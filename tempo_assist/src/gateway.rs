use async_trait::async_trait;
use thiserror::Error;

use crate::chat::ChatTurn;

/// Failure modes of one completion call. The boundary handler logs these and
/// answers with a generic message; the variants never reach the end user.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("completion request failed: {0}")]
    Transport(String),
    #[error("completion service answered with status {0}")]
    Status(u16),
    #[error("completion response body was malformed: {0}")]
    MalformedBody(String),
    #[error("completion response contained no choices")]
    NoChoices,
}

/// One-shot completion seam. Exactly one outbound call per invocation: no
/// retry, no caching, no partial delivery.
#[async_trait]
pub trait Completions: Send + Sync {
    /// Model identifier, surfaced by the health probe.
    fn model(&self) -> &str;

    /// Posts the turn sequence (already including the system turn) and
    /// returns the first completion's text.
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, GatewayError>;
}
