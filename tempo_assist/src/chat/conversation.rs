use thiserror::Error;

use super::message::{ChatTurn, Message, MessageId, Role};

/// Greeting seeded into every fresh (or cleared) conversation. Never sent to
/// the model.
pub const WELCOME_MESSAGE: &str = "Hello! I'm your AI assistant. I can help you manage your calendar, track time, and handle various tasks. How can I assist you today?";

/// Shown in place of a reply when the exchange fails.
pub const APOLOGY_MESSAGE: &str =
    "I apologize, but I encountered an error. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingReply,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SendError {
    #[error("message content must not be blank")]
    BlankContent,
    #[error("a reply is already pending for this conversation")]
    ReplyPending,
}

/// Ordered transcript plus the send/resolve/fail/clear state machine.
///
/// Invariants: at most one message is streaming at a time, and it is always
/// the one recorded in `pending`. Insertion order is display order; nothing
/// is ever reordered or individually removed.
#[derive(Debug)]
pub struct Conversation {
    messages: Vec<Message>,
    next_id: u64,
    welcome_id: MessageId,
    pending: Option<MessageId>,
}

impl Conversation {
    pub fn new() -> Self {
        let mut conversation = Self {
            messages: Vec::new(),
            next_id: 0,
            welcome_id: MessageId(0),
            pending: None,
        };
        conversation.seed_welcome();
        conversation
    }

    fn allocate_id(&mut self) -> MessageId {
        let id = MessageId(self.next_id);
        self.next_id += 1;
        id
    }

    fn seed_welcome(&mut self) {
        let id = self.allocate_id();
        self.welcome_id = id;
        self.messages
            .push(Message::new(id, Role::Assistant, WELCOME_MESSAGE));
    }

    pub fn state(&self) -> ChatState {
        match self.pending {
            Some(_) => ChatState::AwaitingReply,
            None => ChatState::Idle,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Appends the user's message and an empty streaming placeholder, and
    /// moves to `AwaitingReply`. Returns the placeholder id the eventual
    /// `resolve`/`fail` must present.
    pub fn begin_exchange(&mut self, content: &str) -> Result<MessageId, SendError> {
        if content.trim().is_empty() {
            return Err(SendError::BlankContent);
        }
        if self.pending.is_some() {
            return Err(SendError::ReplyPending);
        }

        let user_id = self.allocate_id();
        self.messages
            .push(Message::new(user_id, Role::User, content));

        let placeholder_id = self.allocate_id();
        self.messages.push(Message::placeholder(placeholder_id));
        self.pending = Some(placeholder_id);

        Ok(placeholder_id)
    }

    /// The turns to hand to the chat backend: everything except the seeded
    /// welcome message and the still-streaming placeholder.
    pub fn outbound(&self) -> Vec<ChatTurn> {
        self.messages
            .iter()
            .filter(|m| m.id != self.welcome_id && !m.streaming)
            .map(ChatTurn::from)
            .collect()
    }

    /// Finalizes the pending placeholder with the model's reply. Returns
    /// `false` (and changes nothing) when `id` is not the pending
    /// placeholder, which covers both a stale resolution after `clear()` and
    /// a call outside `AwaitingReply`.
    pub fn resolve(&mut self, id: MessageId, text: impl Into<String>) -> bool {
        self.finalize(id, text.into())
    }

    /// Finalizes the pending placeholder with the fixed apology text.
    pub fn fail(&mut self, id: MessageId) -> bool {
        self.finalize(id, APOLOGY_MESSAGE.to_string())
    }

    fn finalize(&mut self, id: MessageId, text: String) -> bool {
        if self.pending != Some(id) {
            tracing::debug!(?id, "ignoring finalization for non-pending message");
            return false;
        }
        let Some(message) = self.messages.iter_mut().find(|m| m.id == id) else {
            tracing::debug!(?id, "pending message missing from transcript");
            self.pending = None;
            return false;
        };
        message.content = text;
        message.streaming = false;
        self.pending = None;
        true
    }

    /// Drops the whole transcript and reseeds the welcome message. Any
    /// in-flight exchange is abandoned; its late resolution falls into the
    /// pending-id guard above.
    pub fn clear(&mut self) {
        self.messages.clear();
        self.pending = None;
        self.seed_welcome();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
