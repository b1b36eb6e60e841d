//! Chat endpoint with SSE streaming
//!
//! The handler resolves the conversation, appends the user message, and
//! spawns the turn task; the response streams frames from an unbounded
//! channel. The turn task holds the conversation's owned lock end to end, so
//! concurrent requests against the same conversation are serialized.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use futures::StreamExt;
use serde::Deserialize;
use tokio::sync::mpsc;
use tokio::sync::OwnedMutexGuard;
use tokio_stream::wrappers::UnboundedReceiverStream;
use uuid::Uuid;
use validator::Validate;

use lexdraft_common::{Result, ValidatedJson};
use lexdraft_conversations::Conversation;
use lexdraft_llm::{ChatMessage, ChatRequest, FunctionCall, StreamEvent};

use crate::dispatcher;
use crate::prompt::SYSTEM_PROMPT;
use crate::sse::SseFrame;
use crate::state::AppState;

/// Request body for the chat endpoint
#[derive(Debug, Deserialize, Validate)]
pub struct ChatRequestBody {
    /// The user's message
    #[validate(length(min = 1, message = "Message cannot be empty"))]
    pub message: String,

    /// Existing conversation to continue; omitted or unknown starts a new one
    pub conversation_id: Option<Uuid>,
}

/// Stream a chat turn as Server-Sent Events
///
/// **POST /chat**
pub async fn chat(
    State(state): State<AppState>,
    ValidatedJson(body): ValidatedJson<ChatRequestBody>,
) -> Result<Sse<impl Stream<Item = std::result::Result<Event, Infallible>>>> {
    let (conversation_id, handle) = state.store.get_or_create(body.conversation_id).await;

    // Append the user message before opening the stream so that invalid
    // input is rejected with a plain 400 instead of an error frame.
    let mut conversation = handle.lock_owned().await;
    conversation.push_user_message(body.message.clone())?;

    tracing::info!(%conversation_id, "Starting chat turn");

    let (tx, rx) = mpsc::unbounded_channel::<Event>();
    tokio::spawn(run_turn(
        state,
        conversation_id,
        conversation,
        body.message,
        tx,
    ));

    let stream = UnboundedReceiverStream::new(rx).map(Ok);
    Ok(Sse::new(stream).keep_alive(
        KeepAlive::new()
            .interval(Duration::from_secs(15))
            .text("keep-alive"),
    ))
}

/// Send a frame, reporting whether the client is still connected
fn emit(tx: &mpsc::UnboundedSender<Event>, frame: SseFrame) -> bool {
    tx.send(frame.to_event()).is_ok()
}

/// Run one full chat turn against the model.
///
/// Streams the first response forwarding text and collecting function calls,
/// then dispatches each call and streams the model's continuation. A send
/// failure means the client disconnected; the turn stops silently.
async fn run_turn(
    state: AppState,
    conversation_id: Uuid,
    mut conversation: OwnedMutexGuard<Conversation>,
    user_message: String,
    tx: mpsc::UnboundedSender<Event>,
) {
    let mut messages = wire_history(&conversation);
    messages.push(ChatMessage::user(user_message));

    let mut accumulated = String::new();
    let mut function_calls: Vec<FunctionCall> = Vec::new();

    let request = turn_request(&state, messages.clone());
    let mut stream = match state.llm.stream_chat(request).await {
        Ok(stream) => stream,
        Err(error) => {
            tracing::warn!(%conversation_id, %error, "Upstream request failed");
            emit(&tx, SseFrame::Error {
                content: format!("Error: {}", error),
            });
            return;
        }
    };

    while let Some(event) = stream.next().await {
        match event {
            Ok(StreamEvent::Text(chunk)) => {
                accumulated.push_str(&chunk);
                if !emit(&tx, SseFrame::Text { content: chunk }) {
                    return;
                }
            }
            Ok(StreamEvent::FunctionCall(call)) => function_calls.push(call),
            Ok(StreamEvent::EndOfTurn) => break,
            Err(error) => {
                tracing::warn!(%conversation_id, %error, "Upstream stream failed");
                emit(&tx, SseFrame::Error {
                    content: format!("Error: {}", error),
                });
                return;
            }
        }
    }

    for call in function_calls {
        if !emit(&tx, SseFrame::FunctionCall {
            function: call.name.clone(),
            args: call.args.clone(),
        }) {
            return;
        }

        let outcome = dispatcher::dispatch(&mut conversation, &call);

        if let Some(content) = outcome.error.clone() {
            if !emit(&tx, SseFrame::Error { content }) {
                return;
            }
        } else if let Some(content) = outcome.document.clone() {
            if !emit(&tx, SseFrame::Document {
                content,
                changes: outcome.changes.clone(),
            }) {
                return;
            }
        }

        // Feed the call and its result back so the model can explain the
        // outcome in natural language.
        messages.push(ChatMessage::function_call(call.clone()));
        messages.push(ChatMessage::function_response(
            call.name.clone(),
            outcome.response,
        ));

        let request = turn_request(&state, messages.clone());
        let mut continuation = match state.llm.stream_chat(request).await {
            Ok(stream) => stream,
            Err(error) => {
                tracing::warn!(%conversation_id, %error, "Continuation request failed");
                emit(&tx, SseFrame::Error {
                    content: format!("Error: {}", error),
                });
                return;
            }
        };

        while let Some(event) = continuation.next().await {
            match event {
                Ok(StreamEvent::Text(chunk)) => {
                    accumulated.push_str(&chunk);
                    if !emit(&tx, SseFrame::Text { content: chunk }) {
                        return;
                    }
                }
                // Nested calls are not dispatched; one round per turn
                Ok(StreamEvent::FunctionCall(_)) => {}
                Ok(StreamEvent::EndOfTurn) => break,
                Err(error) => {
                    tracing::warn!(%conversation_id, %error, "Continuation stream failed");
                    emit(&tx, SseFrame::Error {
                        content: format!("Error: {}", error),
                    });
                    return;
                }
            }
        }
    }

    if !accumulated.trim().is_empty() {
        if let Err(error) = conversation.push_assistant_message(accumulated) {
            tracing::warn!(%conversation_id, %error, "Failed to record assistant message");
        }
    }

    emit(&tx, SseFrame::Done { conversation_id });
    tracing::info!(%conversation_id, "Chat turn complete");
}

/// Convert the stored history (minus the just-appended user message) into
/// wire messages
fn wire_history(conversation: &Conversation) -> Vec<ChatMessage> {
    let stored = &conversation.messages;
    let prior = &stored[..stored.len().saturating_sub(1)];

    prior
        .iter()
        .map(|message| match message.role {
            lexdraft_conversations::MessageRole::User => ChatMessage::user(message.content.clone()),
            lexdraft_conversations::MessageRole::Assistant => {
                ChatMessage::model(message.content.clone())
            }
        })
        .collect()
}

fn turn_request(state: &AppState, messages: Vec<ChatMessage>) -> ChatRequest {
    ChatRequest {
        model: state.llm.default_model().to_string(),
        system_prompt: Some(SYSTEM_PROMPT.to_string()),
        messages,
        tools: lexdraft_llm::tools::function_declarations(),
    }
}
