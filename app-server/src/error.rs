//! Mapping from library errors to HTTP responses.

use std::time::Duration;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cohort_embeddings::EmbeddingError;
use cohort_ollama::OllamaError;
use cohort_retrieval::RetrievalError;
use tracing::warn;

/// Error returned by every handler. Rendered as `{ "error": "..." }`.
#[derive(Debug)]
pub enum ApiError {
    /// The request body was missing a field or malformed.
    BadRequest(String),
    /// Ollama failed or could not be reached.
    Upstream(String),
    /// The request ran past the configured deadline.
    Timeout(Duration),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }

    fn message(&self) -> String {
        match self {
            Self::BadRequest(msg) | Self::Upstream(msg) => msg.clone(),
            Self::Timeout(limit) => format!("request timed out after {}s", limit.as_secs_f32()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.message();
        if status.is_server_error() {
            warn!(status = %status, error = %message, "Request failed");
        }

        (status, Json(serde_json::json!({ "error": message }))).into_response()
    }
}

impl From<RetrievalError> for ApiError {
    fn from(err: RetrievalError) -> Self {
        if err.is_validation() {
            Self::BadRequest(err.to_string())
        } else {
            Self::Upstream(err.to_string())
        }
    }
}

impl From<OllamaError> for ApiError {
    fn from(err: OllamaError) -> Self {
        Self::Upstream(err.to_string())
    }
}

impl From<EmbeddingError> for ApiError {
    fn from(err: EmbeddingError) -> Self {
        match err {
            EmbeddingError::EmptyInput => Self::BadRequest(err.to_string()),
            other => Self::Upstream(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::BadRequest("x".to_string()).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(OllamaError::Upstream {
                status: 404,
                body: "missing".to_string()
            })
            .status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::Timeout(Duration::from_secs(1)).status(),
            StatusCode::GATEWAY_TIMEOUT
        );
        assert_eq!(
            ApiError::from(EmbeddingError::EmptyInput).status(),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_timeout_message() {
        assert_eq!(
            ApiError::Timeout(Duration::from_millis(1500)).message(),
            "request timed out after 1.5s"
        );
    }
}
