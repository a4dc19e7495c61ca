//! Error types for the RAG engine.

use thiserror::Error;

/// Result type alias for retrieval operations.
pub type Result<T> = std::result::Result<T, RetrievalError>;

/// Errors that can occur in the RAG engine.
///
/// A query against an empty store is not an error; it yields an empty
/// [`crate::QueryOutcome`].
#[derive(Error, Debug)]
pub enum RetrievalError {
    /// A required field was missing or empty. Nothing was changed.
    #[error("{0}")]
    Validation(String),

    /// The model server failed to embed a text.
    #[error("embedding failed: {0}")]
    Embedding(#[from] cohort_embeddings::EmbeddingError),

    /// The model server failed to answer.
    #[error("chat failed: {0}")]
    Chat(#[from] cohort_ollama::OllamaError),
}

impl RetrievalError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Whether the failure came from the caller's input rather than upstream.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
