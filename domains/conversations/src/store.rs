//! In-memory conversation store
//!
//! Conversations live for the lifetime of the process. Each conversation
//! sits behind its own `Mutex` so that requests against the same id are
//! serialized while distinct conversations proceed in parallel; a chat turn
//! holds the owned guard end to end.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::entities::Conversation;

/// Shared handle to a single conversation
pub type ConversationHandle = Arc<Mutex<Conversation>>;

/// Process-wide conversation store
#[derive(Default)]
pub struct ConversationStore {
    conversations: RwLock<HashMap<Uuid, ConversationHandle>>,
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a fresh conversation and return its id and handle
    pub async fn create(&self) -> (Uuid, ConversationHandle) {
        let conversation = Conversation::new();
        let id = conversation.id;
        let handle = Arc::new(Mutex::new(conversation));

        self.conversations.write().await.insert(id, handle.clone());
        tracing::debug!(conversation_id = %id, "Created conversation");

        (id, handle)
    }

    /// Look up a conversation by id
    pub async fn get(&self, id: Uuid) -> Option<ConversationHandle> {
        self.conversations.read().await.get(&id).cloned()
    }

    /// Resolve an optional client-supplied id: a known id returns the
    /// existing conversation, a missing or unknown id creates a fresh one.
    pub async fn get_or_create(&self, id: Option<Uuid>) -> (Uuid, ConversationHandle) {
        if let Some(id) = id {
            if let Some(handle) = self.get(id).await {
                return (id, handle);
            }
        }
        self.create().await
    }

    /// Remove a conversation, returning whether it existed
    pub async fn remove(&self, id: Uuid) -> bool {
        let removed = self.conversations.write().await.remove(&id).is_some();
        if removed {
            tracing::debug!(conversation_id = %id, "Removed conversation");
        }
        removed
    }

    /// Check whether a conversation exists
    pub async fn contains(&self, id: Uuid) -> bool {
        self.conversations.read().await.contains_key(&id)
    }
}
