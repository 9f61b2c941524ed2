use std::time::Duration;

use reqwest::StatusCode;
use thiserror::Error;

use super::config::{
    ChatConfig, CompletionRequest, CompletionResponse, MAX_TOKENS, SYSTEM_PROMPT, TEMPERATURE,
    WireMessage,
};

/// Reply returned when the model produces no usable text.
pub const FALLBACK_REPLY: &str =
    "I couldn't generate a response. Please try rephrasing your question.";

/// Bounded retry for transient upstream unavailability.
///
/// `max_attempts` counts total requests, so the default of 2 means one
/// retry after the initial attempt.
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 2,
            backoff: Duration::from_secs(3),
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts,
            backoff,
        }
    }

    /// Only 503 is worth retrying: the hosted model may be cold-starting.
    pub fn is_transient(&self, status: StatusCode) -> bool {
        status == StatusCode::SERVICE_UNAVAILABLE
    }
}

#[derive(Debug, Error)]
pub enum ChatError {
    #[error("Please send a non-empty message.")]
    EmptyMessage,
    #[error("Kora AI is not configured. Please contact support.")]
    NotConfigured,
    /// Upstream answered with a non-success status after retries.
    #[error("{message}")]
    Upstream { status: u16, message: String },
    #[error("Something went wrong. Please try again.")]
    Network(#[from] reqwest::Error),
}

/// Maps an upstream status to the message shown to the user.
fn classify_status(status: StatusCode) -> &'static str {
    match status {
        StatusCode::UNAUTHORIZED => {
            "Kora AI is not configured correctly. The API key is missing or invalid."
        }
        StatusCode::SERVICE_UNAVAILABLE => {
            "Kora AI is waking up. Please try again in a few seconds."
        }
        StatusCode::IM_A_TEAPOT => {
            "Kora AI's service was updated. Please restart the assistant and try again."
        }
        _ => "Kora AI is temporarily unavailable. Please try again later.",
    }
}

/// Client for the chat completion upstream.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http: reqwest::Client,
    config: ChatConfig,
    retry: RetryPolicy,
}

impl ChatClient {
    pub fn new(config: ChatConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.config.has_api_key()
    }

    /// Sends one user message and returns the assistant reply.
    ///
    /// Retries once on 503 after the configured backoff; every other
    /// non-success status fails immediately with a user-facing message.
    pub async fn complete(&self, message: &str) -> Result<String, ChatError> {
        let message = message.trim();
        if message.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let Some(api_key) = self.config.api_key.as_deref().filter(|k| !k.trim().is_empty())
        else {
            return Err(ChatError::NotConfigured);
        };

        let body = CompletionRequest {
            model: self.config.model.clone(),
            messages: vec![
                WireMessage::system(SYSTEM_PROMPT),
                WireMessage::user(message),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };

        let mut attempt = 1;
        let response = loop {
            let response = self
                .http
                .post(&self.config.api_base)
                .bearer_auth(api_key)
                .json(&body)
                .send()
                .await?;

            let status = response.status();
            if self.retry.is_transient(status) && attempt < self.retry.max_attempts {
                tracing::warn!(%status, attempt, "chat upstream unavailable, retrying");
                tokio::time::sleep(self.retry.backoff).await;
                attempt += 1;
                continue;
            }
            break response;
        };

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            tracing::error!(%status, detail, "chat upstream returned an error");
            return Err(ChatError::Upstream {
                status: status.as_u16(),
                message: classify_status(status).to_string(),
            });
        }

        let completion: CompletionResponse = response.json().await?;
        let reply = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .unwrap_or_else(|| FALLBACK_REPLY.to_string());

        Ok(reply)
    }
}

// ============================================================================
// Tests
// ============================================================================
