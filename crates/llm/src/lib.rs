//! LLM gateway for Lexdraft
//!
//! Defines the provider-agnostic `LlmService` trait plus the request and
//! stream-event types exchanged with it. `GeminiService` implements the trait
//! against the Gemini streaming REST API; `MockLlmService` provides scripted
//! responses for tests.

use std::pin::Pin;

use futures::Stream;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub mod gemini;
pub mod mock;
pub mod tools;

pub use gemini::GeminiService;
pub use mock::MockLlmService;

/// LLM service errors
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("Request error: {0}")]
    Request(String),

    #[error("Response error: {0}")]
    Response(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("Rate limit exceeded")]
    RateLimit,
}

/// LLM service configuration
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: String,
    pub default_model: String,
    pub base_url: Option<String>,
}

/// Message role in a chat exchange
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmRole {
    User,
    Model,
}

/// A function call emitted by the model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionCall {
    pub name: String,
    pub args: Value,
}

/// One part of a chat message: plain text, a model-issued function call,
/// or the caller's response to one.
#[derive(Debug, Clone, PartialEq)]
pub enum MessagePart {
    Text(String),
    FunctionCall(FunctionCall),
    FunctionResponse { name: String, response: Value },
}

/// A single message in the chat history sent to the model
#[derive(Debug, Clone)]
pub struct ChatMessage {
    pub role: LlmRole,
    pub parts: Vec<MessagePart>,
}

impl ChatMessage {
    /// User message containing plain text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: LlmRole::User,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    /// Model message containing plain text
    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: LlmRole::Model,
            parts: vec![MessagePart::Text(text.into())],
        }
    }

    /// Model message echoing a function call it issued
    pub fn function_call(call: FunctionCall) -> Self {
        Self {
            role: LlmRole::Model,
            parts: vec![MessagePart::FunctionCall(call)],
        }
    }

    /// User-role message carrying a function execution result back to the model
    pub fn function_response(name: impl Into<String>, response: Value) -> Self {
        Self {
            role: LlmRole::User,
            parts: vec![MessagePart::FunctionResponse {
                name: name.into(),
                response,
            }],
        }
    }
}

/// A function the model is allowed to call, described as a JSON schema
#[derive(Debug, Clone, Serialize)]
pub struct FunctionDeclaration {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// Request for a streamed chat completion
#[derive(Debug, Clone)]
pub struct ChatRequest {
    /// Model identifier; empty string means the service default
    pub model: String,
    pub system_prompt: Option<String>,
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<FunctionDeclaration>,
}

/// An event produced while streaming a model response
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A chunk of response text, forwarded as it arrives
    Text(String),
    /// The model requests a function call
    FunctionCall(FunctionCall),
    /// The model finished its turn
    EndOfTurn,
}

/// Boxed stream of model events
pub type EventStream = Pin<Box<dyn Stream<Item = Result<StreamEvent, LlmError>> + Send>>;

/// Trait for LLM chat services
#[async_trait::async_trait]
pub trait LlmService: Send + Sync {
    /// Stream a chat completion as a sequence of events
    async fn stream_chat(&self, request: ChatRequest) -> Result<EventStream, LlmError>;

    /// Get the default model for this service
    fn default_model(&self) -> &str;
}
