//! Generative text service boundary
//!
//! [`GenerativeService`] is the seam the enhancement client talks to: one
//! system instruction plus one user prompt in, one reply text out.
//! [`OpenAiChatService`] implements it against an OpenAI-compatible
//! `/chat/completions` endpoint.

use crate::error::EnhanceError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
const USER_AGENT: &str = concat!("yoga-ai/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// One two-message exchange
#[derive(Debug, Clone, PartialEq)]
pub struct ChatRequest {
    pub system: String,
    pub user: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

/// External text-generation collaborator
#[async_trait]
pub trait GenerativeService: Send + Sync {
    /// Send the exchange and return the reply text
    ///
    /// Every error here is a call-level failure (`ServiceFailure`).
    async fn complete(&self, request: &ChatRequest) -> Result<String, EnhanceError>;

    /// Model name used for pricing
    fn model_name(&self) -> &str;
}

/// Connection settings for [`OpenAiChatService`]
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
}

/// OpenAI-compatible chat completions client
pub struct OpenAiChatService {
    config: OpenAiConfig,
    http_client: reqwest::Client,
}

impl OpenAiChatService {
    pub fn new(config: OpenAiConfig) -> Result<Self, EnhanceError> {
        let http_client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| EnhanceError::ServiceFailure(format!("HTTP client setup: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.config.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl GenerativeService for OpenAiChatService {
    async fn complete(&self, request: &ChatRequest) -> Result<String, EnhanceError> {
        let body = ChatCompletionsRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: request.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: request.user.clone(),
                },
            ],
            max_tokens: request.max_tokens,
            temperature: request.temperature,
        };

        tracing::debug!(
            model = %self.config.model,
            prompt_chars = request.user.len(),
            "Sending chat completion request"
        );

        let response = self
            .http_client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| EnhanceError::ServiceFailure(format!("Network error: {}", e)))?;

        let status = response.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(EnhanceError::ServiceFailure("Invalid API key".to_string()));
        }

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EnhanceError::ServiceFailure("Rate limited".to_string()));
        }

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(EnhanceError::ServiceFailure(format!(
                "API error {}: {}",
                status.as_u16(),
                error_text
            )));
        }

        let completion: ChatCompletionsResponse = response
            .json()
            .await
            .map_err(|e| EnhanceError::ServiceFailure(format!("Malformed API envelope: {}", e)))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| EnhanceError::ServiceFailure("Empty reply".to_string()))
    }

    fn model_name(&self) -> &str {
        &self.config.model
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}
