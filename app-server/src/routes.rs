use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Largest accepted request body.
pub const MAX_BODY_BYTES: usize = 2 * 1024 * 1024;

pub fn create_routes(state: AppState) -> Router {
    let ollama_routes = Router::new()
        .route("/health", get(handlers::health_check))
        .route("/chat", post(handlers::chat))
        .route("/embeddings", post(handlers::embeddings));

    let rag_routes = Router::new()
        .route("/reset", post(handlers::reset))
        .route("/add", post(handlers::add_texts))
        .route("/query", post(handlers::query));

    Router::new()
        .nest("/api/ollama", ollama_routes)
        .nest("/api/rag", rag_routes)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
