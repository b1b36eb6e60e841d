//! Gemini API Implementation
//!
//! Calls the Gemini streaming endpoint
//! (https://generativelanguage.googleapis.com/v1beta/models/{model}:streamGenerateContent?alt=sse)
//! using reqwest and relays parsed SSE chunks as `StreamEvent`s through an
//! mpsc channel.

use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::sync::mpsc;
use tokio_stream::wrappers::UnboundedReceiverStream;

use crate::{
    ChatRequest, EventStream, FunctionCall, FunctionDeclaration, LlmConfig, LlmError, LlmRole,
    LlmService, MessagePart, StreamEvent,
};

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Gemini generateContent request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<WireContent>,
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireContent {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<WirePart>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_call: Option<WireFunctionCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    function_response: Option<WireFunctionResponse>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTool {
    function_declarations: Vec<FunctionDeclaration>,
}

/// One SSE chunk of a streamed response
#[derive(Debug, Deserialize)]
struct GenerateContentChunk {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<WireContent>,
    #[allow(dead_code)]
    finish_reason: Option<String>,
}

/// Gemini API error response
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    status: String,
    message: String,
}

/// Gemini LLM service implementation
pub struct GeminiService {
    client: Client,
    config: LlmConfig,
    base_url: String,
}

impl GeminiService {
    /// Create a new Gemini service
    pub fn new(config: LlmConfig) -> Self {
        let base_url = config
            .base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        Self {
            client: Client::new(),
            config,
            base_url,
        }
    }

    fn build_body(&self, request: &ChatRequest) -> GenerateContentRequest {
        let contents = request
            .messages
            .iter()
            .map(|m| WireContent {
                role: Some(
                    match m.role {
                        LlmRole::User => "user",
                        LlmRole::Model => "model",
                    }
                    .to_string(),
                ),
                parts: m
                    .parts
                    .iter()
                    .map(|p| match p {
                        MessagePart::Text(text) => WirePart {
                            text: Some(text.clone()),
                            ..Default::default()
                        },
                        MessagePart::FunctionCall(call) => WirePart {
                            function_call: Some(WireFunctionCall {
                                name: call.name.clone(),
                                args: call.args.clone(),
                            }),
                            ..Default::default()
                        },
                        MessagePart::FunctionResponse { name, response } => WirePart {
                            function_response: Some(WireFunctionResponse {
                                name: name.clone(),
                                response: response.clone(),
                            }),
                            ..Default::default()
                        },
                    })
                    .collect(),
            })
            .collect();

        let system_instruction = request.system_prompt.as_ref().map(|prompt| WireContent {
            role: None,
            parts: vec![WirePart {
                text: Some(prompt.clone()),
                ..Default::default()
            }],
        });

        let tools = if request.tools.is_empty() {
            None
        } else {
            Some(vec![WireTool {
                function_declarations: request.tools.clone(),
            }])
        };

        GenerateContentRequest {
            system_instruction,
            contents,
            tools,
        }
    }
}

#[async_trait::async_trait]
impl LlmService for GeminiService {
    async fn stream_chat(&self, request: ChatRequest) -> Result<EventStream, LlmError> {
        let model = if request.model.is_empty() {
            self.config.default_model.clone()
        } else {
            request.model.clone()
        };

        let body = self.build_body(&request);

        let url = format!(
            "{}/v1beta/models/{}:streamGenerateContent?alt=sse",
            self.base_url, model
        );

        tracing::debug!(model = %model, messages = request.messages.len(), "Sending Gemini API request");

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .header("content-type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Request(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimit);
        }

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());

            // Try to parse as API error
            if let Ok(error_response) = serde_json::from_str::<ErrorResponse>(&error_body) {
                return Err(LlmError::Response(format!(
                    "Gemini API error ({}): {}",
                    error_response.error.status, error_response.error.message
                )));
            }

            return Err(LlmError::Response(format!(
                "Gemini API returned {}: {}",
                status, error_body
            )));
        }

        let (tx, rx) = mpsc::unbounded_channel();

        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        let _ = tx.send(Err(LlmError::Stream(format!(
                            "Stream read failed: {}",
                            e
                        ))));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Process complete lines; a partial line stays buffered for
                // the next chunk.
                while let Some(pos) = buffer.find('\n') {
                    let line: String = buffer.drain(..=pos).collect();
                    let line = line.trim_end();

                    let Some(payload) = line.strip_prefix("data:") else {
                        continue;
                    };
                    let payload = payload.trim();
                    if payload.is_empty() {
                        continue;
                    }

                    let parsed: GenerateContentChunk = match serde_json::from_str(payload) {
                        Ok(parsed) => parsed,
                        Err(e) => {
                            let _ = tx.send(Err(LlmError::Stream(format!(
                                "Failed to parse stream chunk: {}",
                                e
                            ))));
                            return;
                        }
                    };

                    for candidate in parsed.candidates {
                        let Some(content) = candidate.content else {
                            continue;
                        };
                        for part in content.parts {
                            if let Some(text) = part.text {
                                if tx.send(Ok(StreamEvent::Text(text))).is_err() {
                                    return;
                                }
                            }
                            if let Some(call) = part.function_call {
                                let event = StreamEvent::FunctionCall(FunctionCall {
                                    name: call.name,
                                    args: call.args,
                                });
                                if tx.send(Ok(event)).is_err() {
                                    return;
                                }
                            }
                        }
                    }
                }
            }

            let _ = tx.send(Ok(StreamEvent::EndOfTurn));
        });

        Ok(Box::pin(UnboundedReceiverStream::new(rx)))
    }

    fn default_model(&self) -> &str {
        &self.config.default_model
    }
}
