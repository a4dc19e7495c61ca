//! Thin pass-through endpoints for Ollama.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use cohort_embeddings::{Embedding, EmbeddingProvider, EmbeddingRequest};
use cohort_ollama::{ChatMessage, ChatProvider, ChatRequest, ChatResponse, ModelInfo};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum HealthResponse {
    Up { ok: bool, models: Vec<ModelInfo> },
    Down { ok: bool, error: String },
}

/// `GET /api/ollama/health`. Always 200; failures are reported as `ok: false`.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.ollama.list_models().await {
        Ok(models) => Json(HealthResponse::Up { ok: true, models }),
        Err(err) => {
            warn!(error = %err, "Ollama health check failed");
            Json(HealthResponse::Down {
                ok: false,
                error: err.to_string(),
            })
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ChatBody {
    pub model: Option<String>,
    #[serde(default)]
    pub messages: Vec<ChatMessage>,
    pub options: Option<serde_json::Value>,
}

/// `POST /api/ollama/chat`. Non-streaming; relays Ollama's reply.
pub async fn chat(
    State(state): State<AppState>,
    body: Result<Json<ChatBody>, JsonRejection>,
) -> Result<Json<ChatResponse>, ApiError> {
    let Json(body) = body?;
    let model = body
        .model
        .unwrap_or_else(|| ChatProvider::default_model(state.ollama.as_ref()).to_string());

    let mut request = ChatRequest::new(model, body.messages);
    if let Some(options) = body.options {
        request = request.with_options(options);
    }

    Ok(Json(state.ollama.chat(request).await?))
}

#[derive(Debug, Deserialize)]
pub struct EmbeddingsBody {
    pub model: Option<String>,
    pub input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct EmbeddingsResponse {
    pub embedding: Embedding,
}

/// `POST /api/ollama/embeddings`.
pub async fn embeddings(
    State(state): State<AppState>,
    body: Result<Json<EmbeddingsBody>, JsonRejection>,
) -> Result<Json<EmbeddingsResponse>, ApiError> {
    let Json(body) = body?;
    let input = body
        .input
        .filter(|input| !input.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Provide { input: string }".to_string()))?;

    let mut request = EmbeddingRequest::new(input);
    if let Some(model) = body.model {
        request = request.with_model(model);
    }

    let response = state.ollama.embed(request).await?;
    Ok(Json(EmbeddingsResponse {
        embedding: response.embedding,
    }))
}
