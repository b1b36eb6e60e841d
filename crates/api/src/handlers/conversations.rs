//! Conversation read and delete handlers

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use lexdraft_common::{Error, Result};
use lexdraft_conversations::{Conversation, MessageRole};

use crate::state::AppState;

/// One message in a conversation snapshot
#[derive(Debug, Serialize)]
pub struct MessageView {
    pub role: MessageRole,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Snapshot of a conversation's state
#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub id: Uuid,
    pub messages: Vec<MessageView>,
    /// Rendered text of the current document, if one has been generated
    pub document: Option<String>,
    /// Description of the most recent document edit
    pub last_changes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Conversation> for ConversationResponse {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id,
            messages: conversation
                .messages
                .iter()
                .map(|message| MessageView {
                    role: message.role,
                    content: message.content.clone(),
                    created_at: message.created_at,
                })
                .collect(),
            document: conversation
                .document
                .as_ref()
                .map(|document| document.text.clone()),
            last_changes: conversation.last_changes.clone(),
            created_at: conversation.created_at,
            updated_at: conversation.updated_at,
        }
    }
}

/// Get a conversation's history and current document
///
/// **GET /conversations/{id}**
pub async fn get_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<ConversationResponse>> {
    let handle = state
        .store
        .get(id)
        .await
        .ok_or_else(|| Error::NotFound(format!("Conversation {} not found", id)))?;

    let conversation = handle.lock().await;
    Ok(Json(ConversationResponse::from(&*conversation)))
}

/// Delete a conversation and its document
///
/// **DELETE /conversations/{id}**
pub async fn delete_conversation(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode> {
    if state.store.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(Error::NotFound(format!("Conversation {} not found", id)))
    }
}
