//! Embedding providers.
//!
//! A provider turns text into an [`Embedding`]. Concrete providers live next
//! to the HTTP clients that talk to a model server; this module only defines
//! the seam.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::Embedding;
use crate::error::Result;

/// Request for generating embeddings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbeddingRequest {
    /// Text to embed.
    pub text: String,

    /// Model to use (provider default when unset).
    pub model: Option<String>,
}

impl EmbeddingRequest {
    /// Create a new embedding request.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            model: None,
        }
    }

    /// Set the model to use.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Response from embedding generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmbeddingResponse {
    /// The generated embedding.
    pub embedding: Embedding,

    /// Model used to generate the embedding.
    pub model: String,
}

/// Trait for embedding providers.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    /// Get the name of this provider.
    fn name(&self) -> &str;

    /// Get the default model for this provider.
    fn default_model(&self) -> &str;

    /// Generate an embedding for the given text.
    async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbeddingError;
    use pretty_assertions::assert_eq;

    struct LengthProvider;

    #[async_trait]
    impl EmbeddingProvider for LengthProvider {
        fn name(&self) -> &str {
            "length"
        }

        fn default_model(&self) -> &str {
            "len-1"
        }

        async fn embed(&self, request: EmbeddingRequest) -> Result<EmbeddingResponse> {
            if request.text == "boom" {
                return Err(EmbeddingError::Upstream("upstream error 503".to_string()));
            }
            Ok(EmbeddingResponse {
                embedding: vec![request.text.len() as f32, 1.0],
                model: request
                    .model
                    .unwrap_or_else(|| self.default_model().to_string()),
            })
        }
    }

    #[test]
    fn test_embedding_request() {
        let request = EmbeddingRequest::new("Hello world").with_model("nomic-embed-text");

        assert_eq!(request.text, "Hello world");
        assert_eq!(request.model, Some("nomic-embed-text".to_string()));
    }

    #[tokio::test]
    async fn test_provider_falls_back_to_default_model() {
        let provider = LengthProvider;

        let response = provider.embed(EmbeddingRequest::new("abc")).await.unwrap();
        assert_eq!(response.embedding, vec![3.0, 1.0]);
        assert_eq!(response.model, "len-1");

        let response = provider
            .embed(EmbeddingRequest::new("a").with_model("len-2"))
            .await
            .unwrap();
        assert_eq!(response.model, "len-2");
    }

    #[tokio::test]
    async fn test_provider_errors_propagate() {
        let provider: &dyn EmbeddingProvider = &LengthProvider;
        let err = provider.embed(EmbeddingRequest::new("boom")).await.unwrap_err();

        assert!(matches!(err, EmbeddingError::Upstream(_)));
        assert!(err.to_string().contains("503"));
        assert_eq!(provider.name(), "length");
    }
}
