//! Generation client, the single point of entry for Anthropic Messages API
//! calls. No other module talks to the API directly.
//!
//! Endpoint, key, and model are injected through [`LlmConfig`] so tests can
//! point the client at a local server.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

pub const DEFAULT_API_URL: &str = "https://api.anthropic.com/v1/messages";
pub const DEFAULT_MODEL: &str = "claude-3-opus-20240229";
const ANTHROPIC_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl LlmError {
    /// Upstream HTTP status, when a response was received at all. Reserved
    /// for caller-side retry policy (backoff on 429/529).
    #[allow(dead_code)]
    pub fn status(&self) -> Option<u16> {
        match self {
            LlmError::Api { status, .. } => Some(*status),
            LlmError::Http(err) => err.status().map(|s| s.as_u16()),
            LlmError::Parse(_) => None,
        }
    }
}

/// Connection settings for the generation endpoint.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_url: String,
    pub api_key: String,
    pub model: String,
    pub timeout: Duration,
}

/// Token budget and temperature for one call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SamplingParams {
    pub max_tokens: u32,
    pub temperature: f64,
}

impl SamplingParams {
    /// Full multi-question assessment.
    pub const FULL_ASSESSMENT: SamplingParams = SamplingParams {
        max_tokens: 4000,
        temperature: 0.7,
    };
    /// One question scoped to a single topic, sampled tighter.
    pub const SINGLE_QUESTION: SamplingParams = SamplingParams {
        max_tokens: 2000,
        temperature: 0.6,
    };
    /// Follow-up turns on an existing assessment.
    pub const CONVERSATION: SamplingParams = SamplingParams {
        max_tokens: 2000,
        temperature: 0.7,
    };
}

/// One turn in a conversation, in wire form.
#[derive(Debug, Clone, Serialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f64,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ContentBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Concatenates every text block in response order. Non-text blocks
    /// (tool use, images) are skipped.
    pub fn text(&self) -> String {
        self.content
            .iter()
            .filter(|b| b.block_type == "text")
            .filter_map(|b| b.text.as_deref())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct AnthropicError {
    error: AnthropicErrorBody,
}

#[derive(Debug, Deserialize)]
struct AnthropicErrorBody {
    message: String,
}

/// A completed generation: the concatenated assistant text plus the raw
/// response body exactly as the API returned it.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub raw: Value,
}

/// The single generation client shared by all services.
#[derive(Clone)]
pub struct GenerationClient {
    client: Client,
    config: LlmConfig,
}

impl GenerationClient {
    pub fn new(config: LlmConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .expect("Failed to build HTTP client"),
            config,
        }
    }

    /// Sends a single user prompt and returns the generation.
    pub async fn generate(
        &self,
        prompt: &str,
        sampling: SamplingParams,
    ) -> Result<Generation, LlmError> {
        let messages = [ChatMessage::user(prompt)];
        self.send(&messages, sampling).await
    }

    /// Replays a full conversation history and returns the next assistant
    /// turn. Message order is preserved exactly as given.
    pub async fn chat(
        &self,
        messages: &[ChatMessage],
        sampling: SamplingParams,
    ) -> Result<Generation, LlmError> {
        self.send(messages, sampling).await
    }

    async fn send(
        &self,
        messages: &[ChatMessage],
        sampling: SamplingParams,
    ) -> Result<Generation, LlmError> {
        let request_body = MessagesRequest {
            model: &self.config.model,
            max_tokens: sampling.max_tokens,
            temperature: sampling.temperature,
            messages,
        };

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.config.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            // Prefer the structured message, keep the raw body otherwise
            let message = serde_json::from_str::<AnthropicError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            warn!("generation API returned {}: {}", status, message);
            return Err(LlmError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        let raw: Value = serde_json::from_str(&body)?;
        let parsed: MessagesResponse = serde_json::from_value(raw.clone())?;
        let text = parsed.text();

        debug!("generation call succeeded: {} chars", text.len());

        Ok(Generation { text, raw })
    }
}
