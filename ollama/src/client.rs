//! HTTP client for the Ollama REST API.

use async_trait::async_trait;
use cohort_embeddings::{
    Embedding, EmbeddingError, EmbeddingProvider, EmbeddingRequest, EmbeddingResponse,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::chat::{ChatMessage, ChatProvider, ChatRequest, ChatResponse};
use crate::error::{OllamaError, Result};

/// One installed model as reported by `/api/tags`.
///
/// Only the name is interpreted; every other field is kept as-is so the
/// listing can be relayed unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    /// Model tag, e.g. `nomic-embed-text:latest`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Remaining fields (`size`, `digest`, `details`, ...).
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// Ollama API client.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// API base URL, without a trailing slash.
    base_url: String,

    /// HTTP client.
    client: reqwest::Client,

    /// Model used for embeddings when the request names none.
    embed_model: String,

    /// Model used for chat when the request names none.
    chat_model: String,
}

impl OllamaClient {
    /// Default API endpoint.
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";

    /// Default embedding model.
    pub const DEFAULT_EMBED_MODEL: &'static str = "nomic-embed-text";

    /// Default chat model.
    pub const DEFAULT_CHAT_MODEL: &'static str = "gpt-oss:20b";

    /// Create a client for the default local endpoint.
    pub fn new() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            client: reqwest::Client::new(),
            embed_model: Self::DEFAULT_EMBED_MODEL.to_string(),
            chat_model: Self::DEFAULT_CHAT_MODEL.to_string(),
        }
    }

    /// Set the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the default embedding model.
    pub fn with_embed_model(mut self, model: impl Into<String>) -> Self {
        self.embed_model = model.into();
        self
    }

    /// Set the default chat model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = model.into();
        self
    }

    /// Use a preconfigured HTTP client (proxies, timeouts, ...).
    pub fn with_http_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// API base URL, without a trailing slash.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Embed `text` with `model`.
    pub async fn embeddings(&self, model: &str, text: &str) -> Result<Embedding> {
        debug!(model, chars = text.len(), "Requesting embedding");

        let body = EmbeddingsBody {
            model,
            prompt: text,
        };
        let response: EmbeddingsReply = self.post_json("/api/embeddings", &body).await?;

        if response.embedding.is_empty() {
            return Err(OllamaError::InvalidResponse(format!(
                "model {model} returned an empty embedding"
            )));
        }
        Ok(response.embedding)
    }

    /// List the models installed on the server.
    pub async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self
            .client
            .get(format!("{}/api/tags", self.base_url))
            .send()
            .await
            .map_err(OllamaError::transport)?;

        let tags: TagsReply = Self::decode(response, "/api/tags").await?;
        Ok(tags.models)
    }

    async fn post_json<B, R>(&self, path: &str, body: &B) -> Result<R>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(format!("{}{path}", self.base_url))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                let err = OllamaError::transport(e);
                error!(provider = "ollama", path, error = %err, "Ollama request failed");
                err
            })?;

        Self::decode(response, path).await
    }

    async fn decode<R: DeserializeOwned>(response: reqwest::Response, path: &str) -> Result<R> {
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                provider = "ollama",
                path,
                status = %status,
                body = %body,
                "Ollama returned error status"
            );
            return Err(OllamaError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| OllamaError::InvalidResponse(format!("{path}: {e}")))
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmbeddingProvider for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }

    fn default_model(&self) -> &str {
        &self.embed_model
    }

    async fn embed(
        &self,
        request: EmbeddingRequest,
    ) -> cohort_embeddings::Result<EmbeddingResponse> {
        if request.text.is_empty() {
            return Err(EmbeddingError::EmptyInput);
        }

        let model = request.model.unwrap_or_else(|| self.embed_model.clone());
        let embedding = self.embeddings(&model, &request.text).await?;

        Ok(EmbeddingResponse { embedding, model })
    }
}

#[async_trait]
impl ChatProvider for OllamaClient {
    fn default_model(&self) -> &str {
        &self.chat_model
    }

    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        debug!(
            model = %request.model,
            messages = request.messages.len(),
            "Requesting chat completion"
        );

        let body = ChatBody {
            model: &request.model,
            messages: &request.messages,
            stream: false,
            options: request.options.as_ref(),
        };
        self.post_json("/api/chat", &body).await
    }
}

#[derive(Debug, Serialize)]
struct EmbeddingsBody<'a> {
    model: &'a str,
    prompt: &'a str,
}

#[derive(Debug, Deserialize)]
struct EmbeddingsReply {
    #[serde(default)]
    embedding: Embedding,
}

#[derive(Debug, Serialize)]
struct ChatBody<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    stream: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<&'a serde_json::Value>,
}

#[derive(Debug, Deserialize)]
struct TagsReply {
    #[serde(default)]
    models: Vec<ModelInfo>,
}
