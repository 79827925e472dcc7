mod conversation;
mod message;
mod session;

pub use conversation::{ChatState, Conversation, SendError, APOLOGY_MESSAGE, WELCOME_MESSAGE};
pub use message::{ChatTurn, Message, MessageId, Role};
pub use session::{BackendError, ChatBackend, ChatSession};
