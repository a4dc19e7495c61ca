//! REST server for the local RAG demo.
//!
//! Routes:
//!
//! | Method | Path                     | Purpose                               |
//! |--------|--------------------------|---------------------------------------|
//! | GET    | `/api/ollama/health`     | Is Ollama up, which models it has     |
//! | POST   | `/api/ollama/chat`       | Non-streaming chat pass-through       |
//! | POST   | `/api/ollama/embeddings` | Embed one input                       |
//! | POST   | `/api/rag/reset`         | Clear the vector store                |
//! | POST   | `/api/rag/add`           | Embed and store texts                 |
//! | POST   | `/api/rag/query`         | Retrieve top-K matches and answer     |

pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use config::ServerConfig;
pub use error::ApiError;
pub use routes::create_routes;
pub use server::run_server;
pub use state::AppState;
