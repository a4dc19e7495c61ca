//! Configuration for the RAG engine.

use cohort_ollama::OllamaClient;
use serde::{Deserialize, Serialize};

/// System message sent ahead of every RAG prompt.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "You are a concise assistant. If context is insufficient, say so.";

/// Number of matches used when a query does not say.
pub const DEFAULT_TOP_K: usize = 3;

/// Configuration for the RAG engine.
///
/// Every field is a default for requests that leave it out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetrievalConfig {
    /// Model used to embed stored texts and queries.
    pub embed_model: String,

    /// Model used to answer queries.
    pub chat_model: String,

    /// Number of matches fed to the chat model.
    pub top_k: usize,

    /// System message for the answer prompt.
    pub system_prompt: String,
}

impl RetrievalConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self {
            embed_model: OllamaClient::DEFAULT_EMBED_MODEL.to_string(),
            chat_model: OllamaClient::DEFAULT_CHAT_MODEL.to_string(),
            top_k: DEFAULT_TOP_K,
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
        }
    }

    /// Set the embedding model.
    pub fn with_embed_model(mut self, model: impl Into<String>) -> Self {
        self.embed_model = model.into();
        self
    }

    /// Set the chat model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Set the default number of matches.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Set the system message.
    pub fn with_system_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.system_prompt = prompt.into();
        self
    }
}

impl Default for RetrievalConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = RetrievalConfig::default();
        assert_eq!(config.embed_model, "nomic-embed-text");
        assert_eq!(config.chat_model, "gpt-oss:20b");
        assert_eq!(config.top_k, 3);
    }

    #[test]
    fn test_builder() {
        let config = RetrievalConfig::new()
            .with_embed_model("all-minilm")
            .with_chat_model("llama3.2")
            .with_top_k(5)
            .with_system_prompt("Answer in French.");

        assert_eq!(config.embed_model, "all-minilm");
        assert_eq!(config.chat_model, "llama3.2");
        assert_eq!(config.top_k, 5);
        assert_eq!(config.system_prompt, "Answer in French.");
    }
}
