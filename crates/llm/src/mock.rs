//! Mock LLM Service Implementation
//!
//! Deterministic mock for tests: scripted event turns consumed in order,
//! an echo fallback when no script remains, and a failing mode for
//! upstream-error paths.

use std::collections::VecDeque;
use std::sync::Mutex;

use futures::stream;

use crate::{ChatRequest, EventStream, LlmError, LlmService, MessagePart, StreamEvent};

/// Mock LLM service for testing
pub struct MockLlmService {
    turns: Mutex<VecDeque<Vec<StreamEvent>>>,
    fail: bool,
}

impl MockLlmService {
    /// Create a new mock LLM service with no scripted turns
    pub fn new() -> Self {
        Self {
            turns: Mutex::new(VecDeque::new()),
            fail: false,
        }
    }

    /// Create a mock that plays the given turns in order, then falls back
    /// to echoing
    pub fn with_turns(turns: Vec<Vec<StreamEvent>>) -> Self {
        Self {
            turns: Mutex::new(turns.into()),
            fail: false,
        }
    }

    /// Create a mock whose every request fails, for upstream-error paths
    pub fn failing() -> Self {
        Self {
            turns: Mutex::new(VecDeque::new()),
            fail: true,
        }
    }

    /// Queue another scripted turn
    pub fn push_turn(&self, events: Vec<StreamEvent>) {
        self.turns
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(events);
    }

    fn next_turn(&self) -> Option<Vec<StreamEvent>> {
        self.turns
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
    }
}

impl Default for MockLlmService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmService for MockLlmService {
    async fn stream_chat(&self, request: ChatRequest) -> Result<EventStream, LlmError> {
        if self.fail {
            return Err(LlmError::Request("Mock upstream failure".to_string()));
        }

        tracing::debug!(messages = request.messages.len(), "Mock LLM service streaming");

        let events = match self.next_turn() {
            Some(events) => events,
            None => {
                // Echo the last user text when no script remains
                let last_text = request
                    .messages
                    .iter()
                    .rev()
                    .find_map(|m| {
                        m.parts.iter().find_map(|p| match p {
                            MessagePart::Text(text) => Some(text.as_str()),
                            _ => None,
                        })
                    })
                    .unwrap_or("empty");

                vec![
                    StreamEvent::Text(format!("Mock response to: {}", last_text)),
                    StreamEvent::EndOfTurn,
                ]
            }
        };

        Ok(Box::pin(stream::iter(events.into_iter().map(Ok))))
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }
}
