//! Domain entities for the Conversations domain
//!
//! A conversation is the unit of state for a chat session: its ordered
//! message history, the pending field set gathered by the model, and the
//! current generated document (if any).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use lexdraft_common::{Error, Result};
use lexdraft_documents::GeneratedDocument;

/// Message role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

impl std::fmt::Display for MessageRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MessageRole::User => write!(f, "user"),
            MessageRole::Assistant => write!(f, "assistant"),
        }
    }
}

/// Message entity. Immutable once appended to a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Create a new message, rejecting whitespace-only content
    pub fn new(role: MessageRole, content: String) -> Result<Self> {
        if content.trim().is_empty() {
            return Err(Error::Validation(
                "Message content cannot be empty or whitespace-only".to_string(),
            ));
        }

        Ok(Message {
            role,
            content,
            created_at: Utc::now(),
        })
    }
}

/// Conversation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Conversation {
    pub id: Uuid,
    pub messages: Vec<Message>,
    /// Pending key/value set gathered by the model before generation
    pub fields: Map<String, Value>,
    /// Document type remembered from the most recent extraction
    pub pending_document_type: Option<String>,
    pub document: Option<GeneratedDocument>,
    /// Description of the most recent document edit
    pub last_changes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Create a new empty conversation
    pub fn new() -> Self {
        let now = Utc::now();
        Conversation {
            id: Uuid::new_v4(),
            messages: Vec::new(),
            fields: Map::new(),
            pending_document_type: None,
            document: None,
            last_changes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Append a user message
    pub fn push_user_message(&mut self, content: String) -> Result<()> {
        self.push_message(MessageRole::User, content)
    }

    /// Append an assistant message
    pub fn push_assistant_message(&mut self, content: String) -> Result<()> {
        self.push_message(MessageRole::Assistant, content)
    }

    fn push_message(&mut self, role: MessageRole, content: String) -> Result<()> {
        let message = Message::new(role, content)?;
        self.messages.push(message);
        self.touch();
        Ok(())
    }

    /// Merge extracted data into the pending field set, new values winning
    pub fn merge_fields(&mut self, data: Map<String, Value>) {
        for (key, value) in data {
            self.fields.insert(key, value);
        }
        self.touch();
    }

    /// Remember the document type the model is working toward
    pub fn set_pending_document_type(&mut self, document_type: String) {
        self.pending_document_type = Some(document_type);
        self.touch();
    }

    /// Store the current document, replacing any previous one
    pub fn set_document(&mut self, document: GeneratedDocument, changes: Option<String>) {
        self.document = Some(document);
        self.last_changes = changes;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}
