use async_trait::async_trait;
use thiserror::Error;

use super::conversation::{ChatState, Conversation, SendError};
use super::message::ChatTurn;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("chat backend request failed: {0}")]
    Request(String),
    #[error("chat backend returned an unusable reply: {0}")]
    BadReply(String),
}

/// The conversation's view of the chat API: submit the transcript so far,
/// get one reply back. The web crate's boundary handler is one
/// implementation; tests use a stub.
#[async_trait]
pub trait ChatBackend {
    async fn send(&self, turns: &[ChatTurn]) -> Result<String, BackendError>;
}

/// Owns a [`Conversation`] and drives one exchange at a time through a
/// backend. Mirrors the event-loop discipline of the surrounding UI: the
/// await on the backend is the only suspension point, and the
/// `AwaitingReply` state rejects overlapping sends.
pub struct ChatSession<B> {
    conversation: Conversation,
    backend: B,
}

impl<B: ChatBackend> ChatSession<B> {
    pub fn new(backend: B) -> Self {
        Self {
            conversation: Conversation::new(),
            backend,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    pub fn state(&self) -> ChatState {
        self.conversation.state()
    }

    /// Appends the user message and placeholder, awaits the backend, then
    /// finalizes the placeholder with the reply or the apology text. Backend
    /// failures are absorbed into the transcript, not returned.
    pub async fn send(&mut self, content: &str) -> Result<(), SendError> {
        let pending = self.conversation.begin_exchange(content)?;
        let outbound = self.conversation.outbound();

        match self.backend.send(&outbound).await {
            Ok(reply) => {
                self.conversation.resolve(pending, reply);
            }
            Err(err) => {
                tracing::warn!("chat exchange failed: {err}");
                self.conversation.fail(pending);
            }
        }
        Ok(())
    }

    pub fn clear(&mut self) {
        self.conversation.clear();
    }
}
