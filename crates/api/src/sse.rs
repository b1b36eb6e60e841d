//! Server-Sent Events frame envelope
//!
//! Every frame sent to the browser is one JSON object with a `type`
//! discriminator, serialized into a single `data:` line.

use axum::response::sse::Event;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// A frame in the chat event stream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SseFrame {
    /// A chunk of assistant text, forwarded as it arrives
    Text { content: String },

    /// The model is invoking a function; emitted before dispatch
    FunctionCall { function: String, args: Value },

    /// A document was generated or edited
    Document {
        content: String,
        changes: Option<String>,
    },

    /// The turn finished; reports the conversation id for follow-ups
    Done { conversation_id: Uuid },

    /// Something went wrong upstream or during dispatch
    Error { content: String },
}

impl SseFrame {
    /// Serialize the frame into an SSE event
    pub fn to_event(&self) -> Event {
        match Event::default().json_data(self) {
            Ok(event) => event,
            Err(error) => {
                tracing::error!(%error, "Failed to serialize SSE frame");
                Event::default().data(r#"{"type":"error","content":"Failed to serialize event"}"#)
            }
        }
    }
}
