//! Shared state handed to every handler.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use cohort_ollama::OllamaClient;
use cohort_retrieval::{RagEngine, RetrievalConfig};

use crate::error::ApiError;

/// Process-wide state: the Ollama client and the RAG engine owning the store.
#[derive(Clone)]
pub struct AppState {
    pub ollama: Arc<OllamaClient>,
    pub engine: RagEngine,
    pub request_timeout: Option<Duration>,
}

impl AppState {
    pub fn new(
        ollama: OllamaClient,
        retrieval: RetrievalConfig,
        request_timeout: Option<Duration>,
    ) -> Self {
        let ollama = Arc::new(ollama);
        let engine = RagEngine::new(retrieval, ollama.clone(), ollama.clone());
        Self {
            ollama,
            engine,
            request_timeout,
        }
    }

    /// Run `fut`, giving up after the configured request timeout.
    ///
    /// Work already committed by `fut` (records stored before the deadline)
    /// is kept.
    pub async fn with_deadline<F, T>(&self, fut: F) -> Result<T, ApiError>
    where
        F: Future<Output = Result<T, ApiError>>,
    {
        match self.request_timeout {
            Some(limit) => tokio::time::timeout(limit, fut)
                .await
                .map_err(|_| ApiError::Timeout(limit))?,
            None => fut.await,
        }
    }
}
