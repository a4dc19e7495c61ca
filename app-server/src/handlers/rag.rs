//! RAG demo endpoints over the shared [`cohort_retrieval::RagEngine`].

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use cohort_retrieval::{MatchSummary, RagQuery};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ResetResponse {
    pub ok: bool,
}

/// `POST /api/rag/reset`.
pub async fn reset(State(state): State<AppState>) -> Json<ResetResponse> {
    state.engine.reset().await;
    Json(ResetResponse { ok: true })
}

#[derive(Debug, Deserialize)]
pub struct AddBody {
    pub texts: Option<Vec<String>>,
    pub model: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AddResponse {
    pub added: usize,
}

/// `POST /api/rag/add`.
pub async fn add_texts(
    State(state): State<AppState>,
    body: Result<Json<AddBody>, JsonRejection>,
) -> Result<Json<AddResponse>, ApiError> {
    let Json(body) = body?;
    let texts = body
        .texts
        .filter(|texts| !texts.is_empty())
        .ok_or_else(|| ApiError::BadRequest("Provide { texts: string[] }".to_string()))?;

    let outcome = state
        .with_deadline(async {
            state
                .engine
                .add_texts(texts.as_slice(), body.model.as_deref())
                .await
                .map_err(ApiError::from)
        })
        .await?;

    Ok(Json(AddResponse {
        added: outcome.added(),
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueryBody {
    pub query: Option<String>,
    pub top_k: Option<f64>,
    pub embed_model: Option<String>,
    pub chat_model: Option<String>,
}

impl QueryBody {
    fn into_query(self) -> Result<RagQuery, ApiError> {
        let text = self
            .query
            .filter(|q| !q.is_empty())
            .ok_or_else(|| ApiError::BadRequest("Provide { query: string }".to_string()))?;

        let mut query = RagQuery::new(text);
        if let Some(top_k) = self.top_k {
            query = query.with_top_k(match_count(top_k));
        }
        if let Some(model) = self.embed_model {
            query = query.with_embed_model(model);
        }
        if let Some(model) = self.chat_model {
            query = query.with_chat_model(model);
        }
        Ok(query)
    }
}

/// Whole number of matches for a JSON `topK`: fractions round down, NaN and
/// non-positive values mean none, huge values saturate.
fn match_count(top_k: f64) -> usize {
    if top_k.is_nan() || top_k <= 0.0 {
        0
    } else {
        top_k.floor() as usize
    }
}

#[derive(Debug, Serialize)]
pub struct QueryResponse {
    pub matches: Vec<MatchSummary>,
    pub answer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// `POST /api/rag/query`.
pub async fn query(
    State(state): State<AppState>,
    body: Result<Json<QueryBody>, JsonRejection>,
) -> Result<Json<QueryResponse>, ApiError> {
    let Json(body) = body?;
    let query = body.into_query()?;

    let outcome = state
        .with_deadline(async { state.engine.query(query).await.map_err(ApiError::from) })
        .await?;

    Ok(Json(QueryResponse {
        matches: outcome.matches.iter().map(MatchSummary::from).collect(),
        answer: outcome.answer,
        note: outcome.note,
    }))
}
