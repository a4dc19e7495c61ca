//! Error types for the Ollama client.

use cohort_embeddings::EmbeddingError;
use thiserror::Error;

/// Result type alias for Ollama operations.
pub type Result<T> = std::result::Result<T, OllamaError>;

/// Errors that can occur while talking to Ollama.
#[derive(Error, Debug)]
pub enum OllamaError {
    /// Ollama answered with a non-success status.
    #[error("ollama error {status}: {body}")]
    Upstream { status: u16, body: String },

    /// The request never produced a response.
    #[error("ollama {kind} error: {source}")]
    Transport {
        kind: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be understood.
    #[error("invalid response from ollama: {0}")]
    InvalidResponse(String),
}

impl OllamaError {
    pub(crate) fn transport(source: reqwest::Error) -> Self {
        let kind = if source.is_timeout() {
            "timeout"
        } else if source.is_connect() {
            "connect"
        } else if source.is_request() {
            "request"
        } else {
            "unknown"
        };
        Self::Transport { kind, source }
    }

    /// Upstream HTTP status, if Ollama produced one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Transport { .. } | Self::InvalidResponse(_) => None,
        }
    }
}

impl From<OllamaError> for EmbeddingError {
    fn from(err: OllamaError) -> Self {
        match err {
            OllamaError::InvalidResponse(msg) => EmbeddingError::InvalidResponse(msg),
            other => EmbeddingError::Upstream(other.to_string()),
        }
    }
}
