//! Error types for the embeddings system.

use thiserror::Error;

/// Result type alias for embedding operations.
pub type Result<T> = std::result::Result<T, EmbeddingError>;

/// Errors that can occur while producing embeddings.
#[derive(Error, Debug)]
pub enum EmbeddingError {
    /// Text was empty or whitespace only.
    #[error("cannot embed empty text")]
    EmptyInput,

    /// The model endpoint rejected the request or could not be reached.
    ///
    /// The message carries the upstream status code when one is available.
    #[error("{0}")]
    Upstream(String),

    /// Invalid response from provider.
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
