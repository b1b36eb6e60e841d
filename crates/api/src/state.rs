//! Shared application state

use std::sync::Arc;

use lexdraft_conversations::ConversationStore;
use lexdraft_llm::LlmService;

/// State shared by all request handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<ConversationStore>,
    pub llm: Arc<dyn LlmService>,
}

impl AppState {
    pub fn new(store: Arc<ConversationStore>, llm: Arc<dyn LlmService>) -> Self {
        Self { store, llm }
    }
}
