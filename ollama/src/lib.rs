//! # Ollama client
//!
//! Thin async client for a locally running Ollama server. It covers the three
//! endpoints the RAG server needs:
//!
//! - `POST /api/embeddings` through [`cohort_embeddings::EmbeddingProvider`]
//! - `POST /api/chat` (non-streaming) through [`ChatProvider`]
//! - `GET /api/tags` for health checks
//!
//! The client never retries and does not enforce timeouts of its own; callers
//! wrap requests in their own deadline when they need one.

pub mod chat;
pub mod client;
pub mod error;

pub use chat::{ChatMessage, ChatProvider, ChatRequest, ChatResponse, Role};
pub use client::{ModelInfo, OllamaClient};
pub use error::{OllamaError, Result};
