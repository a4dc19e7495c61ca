pub mod ollama;
pub mod rag;

pub use ollama::{chat, embeddings, health_check};
pub use rag::{add_texts, query, reset};
