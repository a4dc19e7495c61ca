//! Chat messages and the chat provider seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Author of a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Instructions that frame the conversation.
    System,

    /// The person asking.
    User,

    /// The model.
    Assistant,
}

/// A single message in a chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who wrote the message.
    pub role: Role,

    /// Message text.
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    /// Create a new message.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }
}

/// A non-streaming chat request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// Model to run.
    pub model: String,

    /// Ordered transcript.
    pub messages: Vec<ChatMessage>,

    /// Model options passed through untouched (temperature, seed, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
}

impl ChatRequest {
    /// Create a new request without model options.
    pub fn new(model: impl Into<String>, messages: Vec<ChatMessage>) -> Self {
        Self {
            model: model.into(),
            messages,
            options: None,
        }
    }

    /// Set the model options.
    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = Some(options);
        self
    }
}

/// Response to a non-streaming chat request.
///
/// Fields other than `model`, `message` and `done` (timings, token counts)
/// are kept in `extra` so the response can be relayed as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Model that answered.
    #[serde(default)]
    pub model: String,

    /// The reply, if any.
    #[serde(default)]
    pub message: Option<ChatMessage>,

    /// Whether generation finished.
    #[serde(default)]
    pub done: bool,

    /// Everything else Ollama reported.

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ChatResponse {
    /// Text of the reply, empty when the model sent no message.
    pub fn content(&self) -> &str {
        self.message.as_ref().map_or("", |m| m.content.as_str())
    }
}

/// Trait for chat providers.
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Model used when the caller does not name one.
    fn default_model(&self) -> &str;

    /// Run a chat completion and wait for the full reply.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_roles_serialize_lowercase() {
        let value = serde_json::to_value(ChatMessage::system("be brief")).unwrap();
        assert_eq!(value, json!({"role": "system", "content": "be brief"}));
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let parsed: std::result::Result<ChatMessage, _> =
            serde_json::from_value(json!({"role": "tool", "content": "x"}));
        assert!(parsed.is_err());
    }

    #[test]
    fn test_response_keeps_extra_fields() {
        let response: ChatResponse = serde_json::from_value(json!({
            "model": "llama3.2",
            "message": {"role": "assistant", "content": "Blue."},
            "done": true,
            "eval_count": 12
        }))
        .unwrap();

        assert_eq!(response.content(), "Blue.");
        assert_eq!(response.extra.get("eval_count"), Some(&json!(12)));
    }

    #[test]
    fn test_response_without_message_has_empty_content() {
        let response: ChatResponse = serde_json::from_value(json!({"done": true})).unwrap();
        assert_eq!(response.content(), "");
    }
}
