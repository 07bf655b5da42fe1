//! Request parameters and chat messages.

use serde::{Deserialize, Serialize};

/// Sampling parameters shared by `generate` and `chat`.
///
/// The defaults (`max_tokens = 100`, `temperature = 0.7`) apply whenever a
/// caller does not override them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f64,
}

impl GenerationParams {
    /// Default `max_tokens`.
    pub const DEFAULT_MAX_TOKENS: u32 = 100;
    /// Default `temperature`.
    pub const DEFAULT_TEMPERATURE: f64 = 0.7;

    /// Creates parameters with explicit values.
    pub fn new(max_tokens: u32, temperature: f64) -> Self {
        Self {
            max_tokens,
            temperature,
        }
    }

    /// Returns a copy with `max_tokens` replaced.
    #[must_use]
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Returns a copy with `temperature` replaced.
    #[must_use]
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self::new(Self::DEFAULT_MAX_TOKENS, Self::DEFAULT_TEMPERATURE)
    }
}

// ---------------------------------------------------------------------------

/// Author of a [`ChatMessage`]. Serialised in lowercase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    System,
    User,
    Assistant,
}

/// One entry of a chat conversation, sent as `{"role": ..., "content": ...}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
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

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_match_reference_values() {
        let params = GenerationParams::default();
        assert_eq!(params.max_tokens, 100);
        assert_eq!(params.temperature, 0.7);
    }

    #[test]
    fn overrides_leave_the_other_field_alone() {
        let params = GenerationParams::default().with_max_tokens(200);
        assert_eq!(params, GenerationParams::new(200, 0.7));
        let params = GenerationParams::default().with_temperature(0.1);
        assert_eq!(params, GenerationParams::new(100, 0.1));
    }

    #[test]
    fn messages_use_lowercase_roles() {
        let messages = vec![
            ChatMessage::system("be brief"),
            ChatMessage::user("hi"),
            ChatMessage::assistant("hello"),
        ];
        assert_eq!(
            serde_json::to_value(&messages).unwrap(),
            json!([
                {"role": "system", "content": "be brief"},
                {"role": "user", "content": "hi"},
                {"role": "assistant", "content": "hello"},
            ])
        );
    }
}
