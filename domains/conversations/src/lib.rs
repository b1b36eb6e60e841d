//! Conversations domain: chat threads, messages, in-memory store

pub mod domain;
pub mod store;

// Re-export domain types at the crate root for convenience
pub use domain::entities::{Conversation, Message, MessageRole};
pub use store::ConversationStore;
