//! Chat-completion requests.
//!
//! One call sends a system instruction and a single user message to
//! `POST {base_url}/chat/completions` and returns the first choice's text.
//! The call blocks the current thread for at most the configured timeout.
//! Nothing is retried; transport, HTTP-status, and body-shape failures all
//! surface as [`LlmError`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use ureq::Agent;

use lexclass_core::error::PipelineError;
use lexclass_core::pipeline::Classifier;

use crate::config::ChatConfig;
use crate::error::LlmError;

// ── Types ────────────────────────────────────────────────────────────────────

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Role of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatRole {
    System,
    User,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    max_tokens: u32,
}

/// The subset of a chat-completion response this crate reads.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
    #[serde(default)]
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Usage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
}

impl ChatCompletionResponse {
    /// Text of the first choice. An empty `choices` list is an error, not a
    /// panic.
    pub fn into_first_text(self) -> Result<String, LlmError> {
        let choice = self.choices.into_iter().next().ok_or(LlmError::NoChoices)?;
        choice.message.content.ok_or(LlmError::NoContent)
    }
}

/// Parse a raw response body and return the first choice's text.
pub fn parse_completion(body: &str) -> Result<String, LlmError> {
    let response: ChatCompletionResponse =
        serde_json::from_str(body).map_err(|e| LlmError::ResponseParse(e.to_string()))?;
    response.into_first_text()
}

/// Pull the human-readable message out of an API error body, falling back to
/// the raw body.
fn api_error_message(body: &str) -> String {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: ErrorDetail,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: String,
    }

    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.error.message,
        Err(_) => {
            let trimmed = body.trim();
            if trimmed.is_empty() {
                "empty response body".to_string()
            } else {
                trimmed.chars().take(500).collect()
            }
        }
    }
}

// ── Client ───────────────────────────────────────────────────────────────────

/// Blocking chat-completion client.
pub struct ChatClient {
    config: ChatConfig,
    agent: Agent,
    endpoint: String,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Result<Self, LlmError> {
        if config.api_key.trim().is_empty() {
            return Err(LlmError::Config("API key is empty".to_string()));
        }
        if config.model.trim().is_empty() {
            return Err(LlmError::Config("model is empty".to_string()));
        }
        if config.timeout.is_zero() {
            return Err(LlmError::Config("timeout must be greater than zero".to_string()));
        }

        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(config.timeout))
            .http_status_as_error(false)
            .build()
            .into();
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        info!(
            endpoint = %endpoint,
            model = %config.model,
            max_tokens = config.max_tokens,
            timeout_secs = config.timeout.as_secs_f64(),
            "chat client configured"
        );

        Ok(Self {
            config,
            agent,
            endpoint,
        })
    }

    /// Send `messages` and return the first choice's text.
    pub fn converse(&self, messages: &[ChatMessage]) -> Result<String, LlmError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages,
            max_tokens: self.config.max_tokens,
        };

        debug!(
            model = %self.config.model,
            messages = messages.len(),
            "sending chat completion request"
        );

        let mut response = self
            .agent
            .post(&self.endpoint)
            .header("Authorization", &format!("Bearer {}", self.config.api_key))
            .send_json(&request)?;

        let status = response.status();
        let body = response.body_mut().read_to_string()?;

        if !status.is_success() {
            return Err(LlmError::Status {
                status: status.as_u16(),
                message: api_error_message(&body),
            });
        }

        let parsed: ChatCompletionResponse =
            serde_json::from_str(&body).map_err(|e| LlmError::ResponseParse(e.to_string()))?;

        if let Some(usage) = parsed.usage {
            info!(
                model = %self.config.model,
                input_tokens = usage.prompt_tokens,
                output_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }
        if let Some(reason) = parsed.choices.first().and_then(|c| c.finish_reason.as_deref()) {
            debug!(finish_reason = reason, "chat completion finished");
        }

        parsed.into_first_text()
    }

    /// Send one system instruction and one user message.
    pub fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        self.converse(&[ChatMessage::system(system_prompt), ChatMessage::user(user_prompt)])
    }
}

impl Classifier for ChatClient {
    fn classify(&self, system_prompt: &str, user_prompt: &str) -> Result<String, PipelineError> {
        Ok(self.complete(system_prompt, user_prompt)?)
    }
}
