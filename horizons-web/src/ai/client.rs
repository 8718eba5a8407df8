//! Chat-completion client
//!
//! [`ChatBackend`] is the seam between plan orchestration and the AI
//! provider. [`GroqClient`] talks to Groq's OpenAI-compatible
//! `/chat/completions` endpoint; tests substitute scripted backends.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

use super::persona::Persona;

const USER_AGENT: &str = concat!("healing-horizons/", env!("CARGO_PKG_VERSION"));

/// Persona client errors
#[derive(Debug, Error)]
pub enum AiError {
    #[error("Network error: {0}")]
    Network(String),

    /// Non-2xx response; the body usually holds the provider's JSON error
    #[error("API error {0}: {1}")]
    Api(u16, String),

    #[error("Request timeout after {0:?}")]
    Timeout(Duration),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Backend cannot serve any request (missing key, bad endpoint)
    #[error("AI backend unavailable: {0}")]
    Unavailable(String),
}

/// Source of persona replies
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Fails when no request could possibly succeed
    async fn ensure_ready(&self) -> Result<(), AiError>;

    /// Generate `persona`'s reply to `prompt`
    async fn complete(&self, persona: Persona, prompt: &str) -> Result<String, AiError>;
}

#[derive(Serialize)]
struct Request<'a> {
    model: &'a str,
    messages: Vec<Message>,
}

#[derive(Serialize)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct Response {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Groq chat-completion client
pub struct GroqClient {
    http_client: Client,
    api_key: String,
    model: String,
    endpoint: String,
    timeout: Duration,
}

impl GroqClient {
    /// Build a client; `timeout` bounds each HTTP exchange
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let http_client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| AiError::Network(e.to_string()))?;

        Ok(Self {
            http_client,
            api_key: api_key.into(),
            model: model.into(),
            endpoint: format!("{}/chat/completions", base_url.trim_end_matches('/')),
            timeout,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn request_body(&self, persona: Persona, prompt: &str) -> Request<'_> {
        Request {
            model: &self.model,
            messages: vec![
                Message {
                    role: "system",
                    content: persona.system_prompt(),
                },
                Message {
                    role: "user",
                    content: prompt.to_string(),
                },
            ],
        }
    }
}

#[async_trait]
impl ChatBackend for GroqClient {
    async fn ensure_ready(&self) -> Result<(), AiError> {
        if self.api_key.trim().is_empty() {
            return Err(AiError::Unavailable("API key is empty".to_string()));
        }
        reqwest::Url::parse(&self.endpoint)
            .map_err(|e| AiError::Unavailable(format!("Invalid endpoint {}: {}", self.endpoint, e)))?;
        Ok(())
    }

    async fn complete(&self, persona: Persona, prompt: &str) -> Result<String, AiError> {
        tracing::debug!(persona = %persona, model = %self.model, "Requesting completion");

        let response = self
            .http_client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(persona, prompt))
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AiError::Timeout(self.timeout)
                } else {
                    AiError::Network(e.to_string())
                }
            })?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            return Err(AiError::Api(status.as_u16(), error_text));
        }

        let body: Response = response
            .json()
            .await
            .map_err(|e| AiError::Parse(e.to_string()))?;

        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();

        tracing::debug!(persona = %persona, chars = content.len(), "Completion received");

        Ok(content)
    }
}
