use serde::{Deserialize, Serialize};

/// Default OpenAI-compatible completion endpoint.
pub const DEFAULT_API_BASE: &str = "https://router.huggingface.co/v1/chat/completions";

/// Default completion model.
pub const DEFAULT_MODEL: &str = "mistralai/Mistral-7B-Instruct-v0.2";

/// System prompt establishing the assistant persona.
pub const SYSTEM_PROMPT: &str = "You are Kora AI, the helpful assistant of KodBank, a modern digital bank. \
     Answer questions about banking, accounts, transfers, and financial literacy. \
     Be concise and friendly. If asked about something unrelated to banking, \
     politely steer the conversation back to how you can help with KodBank services.";

/// Completion request tuning shared by every upstream call.
pub const MAX_TOKENS: u32 = 256;
pub const TEMPERATURE: f64 = 0.7;

/// Configuration for the chat completion upstream.
#[derive(Debug, Clone)]
pub struct ChatConfig {
    pub api_base: String,
    pub api_key: Option<String>,
    pub model: String,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: None,
            model: DEFAULT_MODEL.to_string(),
        }
    }
}

impl ChatConfig {
    /// Reads `HF_API_KEY`, and optionally `CHAT_API_BASE` / `CHAT_MODEL`
    /// to point at a different OpenAI-compatible endpoint.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(key) = std::env::var("HF_API_KEY") {
            if !key.trim().is_empty() {
                config.api_key = Some(key);
            }
        }
        if let Ok(base) = std::env::var("CHAT_API_BASE") {
            if !base.trim().is_empty() {
                config.api_base = base;
            }
        }
        if let Ok(model) = std::env::var("CHAT_MODEL") {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        config
    }

    pub fn with_api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct WireMessage {
    pub role: &'static str,
    pub content: String,
}

impl WireMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system",
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user",
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub max_tokens: u32,
    pub temperature: f64,
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    pub message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_points_at_hosted_router() {
        let config = ChatConfig::default();
        assert_eq!(config.api_base, DEFAULT_API_BASE);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(!config.has_api_key());
    }

    #[test]
    fn blank_api_key_counts_as_missing() {
        let config = ChatConfig::default().with_api_key("   ");
        assert!(!config.has_api_key());
    }

    #[test]
    fn completion_request_serializes_expected_shape() {
        let request = CompletionRequest {
            model: DEFAULT_MODEL.to_string(),
            messages: vec![
                WireMessage::system(SYSTEM_PROMPT),
                WireMessage::user("What is my balance?"),
            ],
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["model"], DEFAULT_MODEL);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["role"], "user");
        assert_eq!(json["max_tokens"], 256);
        assert_eq!(json["temperature"], 0.7);
    }

    #[test]
    fn completion_response_tolerates_missing_content() {
        let parsed: CompletionResponse =
            serde_json::from_str(r#"{"choices":[{"message":{}}]}"#).unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
