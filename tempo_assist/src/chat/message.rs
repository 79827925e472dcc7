use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifies a message within one conversation. Ids are handed out by the
/// owning [`Conversation`](super::Conversation) and are never reused, even
/// across a clear.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MessageId(pub(crate) u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
    System,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
            Role::System => "system",
        }
    }
}

/// One entry in a conversation transcript.
///
/// `content` is only mutated while the message is the pending assistant
/// placeholder (`streaming = true`); after finalization it never changes.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub id: MessageId,
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub streaming: bool,
}

impl Message {
    pub(crate) fn new(id: MessageId, role: Role, content: impl Into<String>) -> Self {
        Self {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
            streaming: false,
        }
    }

    pub(crate) fn placeholder(id: MessageId) -> Self {
        Self {
            streaming: true,
            ..Self::new(id, Role::Assistant, "")
        }
    }
}

/// The wire shape shared by the chat boundary and the completion gateway:
/// just a role and its text, nothing conversation-local.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

impl ChatTurn {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }
}

impl From<&Message> for ChatTurn {
    fn from(message: &Message) -> Self {
        Self::new(message.role, message.content.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        let json = serde_json::to_string(&ChatTurn::new(Role::Assistant, "hi")).unwrap();
        assert_eq!(json, r#"{"role":"assistant","content":"hi"}"#);
    }

    #[test]
    fn unknown_role_is_rejected() {
        let result: Result<ChatTurn, _> =
            serde_json::from_str(r#"{"role":"robot","content":"hi"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn placeholder_starts_empty_and_streaming() {
        let message = Message::placeholder(MessageId(7));
        assert_eq!(message.role, Role::Assistant);
        assert!(message.content.is_empty());
        assert!(message.streaming);
    }
}
