//! # Retrieval
//!
//! A toy retrieval-augmented generation pipeline over an in-memory store.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                          RagEngine                              │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  add:    text ──► EmbeddingProvider ──► VectorStore             │
//! │                                                                 │
//! │  query:  text ──► EmbeddingProvider ──► rank_top_k              │
//! │                                             │                   │
//! │                                             ▼                   │
//! │                 answer ◄── ChatProvider ◄── build_messages      │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use cohort_ollama::OllamaClient;
//! use cohort_retrieval::{RagEngine, RagQuery, RetrievalConfig};
//!
//! let client = Arc::new(OllamaClient::new());
//! let engine = RagEngine::new(RetrievalConfig::default(), client.clone(), client);
//!
//! engine.add_texts(&["cats are mammals", "the sky is blue"], None).await?;
//! let outcome = engine.query(RagQuery::new("what color is the sky").with_top_k(1)).await?;
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod prompt;
pub mod ranker;
pub mod store;

pub use config::RetrievalConfig;
pub use engine::{AddOutcome, EMPTY_STORE_NOTE, QueryOutcome, RagEngine, RagQuery};
pub use error::{Result, RetrievalError};
pub use ranker::{MatchSummary, ScoredMatch, rank_top_k};
pub use store::{Record, VectorStore};
