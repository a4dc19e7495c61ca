//! Retrieval-augmented generation engine.

use std::sync::Arc;

use cohort_embeddings::{EmbeddingProvider, EmbeddingRequest};
use cohort_ollama::{ChatProvider, ChatRequest};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::RetrievalConfig;
use crate::error::{Result, RetrievalError};
use crate::prompt::{build_context, build_messages};
use crate::ranker::{ScoredMatch, rank_top_k};
use crate::store::{Record, VectorStore};

/// Note attached to the result of a query against an empty store.
pub const EMPTY_STORE_NOTE: &str = "Vector store empty. Add some texts first.";

/// A question to answer from the stored texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RagQuery {
    /// The question. Must not be empty.
    pub text: String,

    /// Number of matches to use as context (engine default when unset).
    pub top_k: Option<usize>,

    /// Embedding model for the question (engine default when unset).
    pub embed_model: Option<String>,

    /// Chat model for the answer (engine default when unset).
    pub chat_model: Option<String>,
}

impl RagQuery {
    /// Create a new query using the engine defaults.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            top_k: None,
            embed_model: None,
            chat_model: None,
        }
    }

    /// Set the number of matches.
    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = Some(top_k);
        self
    }

    /// Set the embedding model.
    pub fn with_embed_model(mut self, model: impl Into<String>) -> Self {
        self.embed_model = Some(model.into());
        self
    }

    /// Set the chat model.
    pub fn with_chat_model(mut self, model: impl Into<String>) -> Self {
        self.chat_model = Some(model.into());
        self
    }
}

/// Result of [`RagEngine::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutcome {
    /// Best matches, highest score first.
    pub matches: Vec<ScoredMatch>,

    /// Model answer; `None` when the store was empty.
    pub answer: Option<String>,

    /// Explanation when no answer was attempted.
    pub note: Option<String>,
}

impl QueryOutcome {
    fn empty_store() -> Self {
        Self {
            matches: Vec::new(),
            answer: None,
            note: Some(EMPTY_STORE_NOTE.to_string()),
        }
    }
}

/// Result of [`RagEngine::add_texts`].
#[derive(Debug, Clone, PartialEq)]
pub struct AddOutcome {
    /// Stored records, in request order.
    pub records: Vec<Arc<Record>>,
}

impl AddOutcome {
    /// Number of texts stored.
    pub fn added(&self) -> usize {
        self.records.len()
    }
}

/// Owns the vector store and drives embed, rank, compose and answer.
///
/// The store lock is held only to append a single record or to take a
/// snapshot, never across a model call. A reader may therefore see any prefix
/// of a batch that is still being added.
#[derive(Clone)]
pub struct RagEngine {
    config: RetrievalConfig,
    store: Arc<RwLock<VectorStore>>,
    embedder: Arc<dyn EmbeddingProvider>,
    chat: Arc<dyn ChatProvider>,
}

impl RagEngine {
    /// Create an engine with an empty store.
    pub fn new(
        config: RetrievalConfig,
        embedder: Arc<dyn EmbeddingProvider>,
        chat: Arc<dyn ChatProvider>,
    ) -> Self {
        info!(
            embed_model = %config.embed_model,
            chat_model = %config.chat_model,
            top_k = config.top_k,
            "Initializing RAG engine"
        );
        Self {
            config,
            store: Arc::new(RwLock::new(VectorStore::new())),
            embedder,
            chat,
        }
    }

    /// Discard every stored record.
    pub async fn reset(&self) {
        self.store.write().await.reset();
    }

    /// Embed and store a single text.
    pub async fn add(&self, text: &str, model: Option<&str>) -> Result<Arc<Record>> {
        if text.is_empty() {
            return Err(RetrievalError::validation("text must not be empty"));
        }

        let model = model.unwrap_or(&self.config.embed_model);
        let response = self
            .embedder
            .embed(EmbeddingRequest::new(text).with_model(model))
            .await?;

        self.store
            .write()
            .await
            .insert(text, response.embedding, response.model)
    }

    /// Embed and store a batch of texts, in order.
    ///
    /// The whole batch is validated first. Texts are embedded one at a time
    /// and stored as soon as their embedding arrives, so when an embedding
    /// fails the texts before it stay stored.
    pub async fn add_texts<S>(&self, texts: &[S], model: Option<&str>) -> Result<AddOutcome>
    where
        S: AsRef<str>,
    {
        if texts.is_empty() {
            return Err(RetrievalError::validation("Provide { texts: string[] }"));
        }
        if let Some(position) = texts.iter().position(|t| t.as_ref().is_empty()) {
            return Err(RetrievalError::validation(format!(
                "texts[{position}] must not be empty"
            )));
        }

        let mut records = Vec::with_capacity(texts.len());
        for text in texts {
            records.push(self.add(text.as_ref(), model).await?);
        }

        let total = self.store.read().await.len();
        info!(added = records.len(), total, "Added texts to vector store");
        Ok(AddOutcome { records })
    }

    /// Answer `query` from the best matching stored texts.
    pub async fn query(&self, query: RagQuery) -> Result<QueryOutcome> {
        if query.text.is_empty() {
            return Err(RetrievalError::validation("Provide { query: string }"));
        }

        let records = {
            let store = self.store.read().await;
            if store.is_empty() {
                debug!("Query against empty store");
                return Ok(QueryOutcome::empty_store());
            }
            store.all()
        };

        let embed_model = query
            .embed_model
            .unwrap_or_else(|| self.config.embed_model.clone());
        let chat_model = query
            .chat_model
            .unwrap_or_else(|| self.config.chat_model.clone());
        let top_k = query.top_k.unwrap_or(self.config.top_k);

        let query_embedding = self
            .embedder
            .embed(EmbeddingRequest::new(query.text.as_str()).with_model(embed_model))
            .await?
            .embedding;

        let matches = rank_top_k(&query_embedding, &records, top_k);
        debug!(
            candidates = records.len(),
            matches = matches.len(),
            "Ranked stored records"
        );

        let context = build_context(&matches);
        let messages = build_messages(&self.config.system_prompt, &context, &query.text);
        let response = self
            .chat
            .chat(ChatRequest::new(chat_model, messages))
            .await?;

        Ok(QueryOutcome {
            matches,
            answer: Some(response.content().to_string()),
            note: None,
        })
    }

    /// Snapshot of the stored records in insertion order.
    pub async fn records(&self) -> Vec<Arc<Record>> {
        self.store.read().await.all()
    }
}
