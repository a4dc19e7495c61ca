//! Server configuration, from command-line flags or the environment.

use std::time::Duration;

use clap::Parser;
use cohort_ollama::OllamaClient;
use cohort_retrieval::RetrievalConfig;
use cohort_retrieval::config::DEFAULT_TOP_K;

/// Configuration for the RAG demo server.
///
/// Every flag can also be set through the environment variable named in its
/// help text. A `.env` file in the working directory is read before parsing.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    name = "cohort-rag-server",
    about = "REST API over a local Ollama instance with a tiny in-memory RAG store"
)]
pub struct ServerConfig {
    /// Address to bind.
    #[arg(long, env = "BIND_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 5175)]
    pub port: u16,

    /// Base URL of the Ollama server.
    #[arg(long, env = "OLLAMA_URL", default_value = OllamaClient::DEFAULT_BASE_URL)]
    pub ollama_url: String,

    /// Chat model used when a request names none.
    #[arg(long, env = "CHAT_MODEL", default_value = OllamaClient::DEFAULT_CHAT_MODEL)]
    pub chat_model: String,

    /// Embedding model used when a request names none.
    #[arg(long, env = "EMBED_MODEL", default_value = OllamaClient::DEFAULT_EMBED_MODEL)]
    pub embed_model: String,

    /// Number of matches used when a query omits `topK`.
    #[arg(long, env = "RAG_TOP_K", default_value_t = DEFAULT_TOP_K)]
    pub top_k: usize,

    /// Abort RAG add/query requests that take longer than this many seconds.
    #[arg(long, env = "REQUEST_TIMEOUT_SECS")]
    pub request_timeout_secs: Option<u64>,
}

impl ServerConfig {
    /// Address string suitable for `TcpListener::bind`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn ollama_client(&self) -> OllamaClient {
        OllamaClient::new()
            .with_base_url(self.ollama_url.as_str())
            .with_embed_model(self.embed_model.as_str())
            .with_chat_model(self.chat_model.as_str())
    }

    pub fn retrieval_config(&self) -> RetrievalConfig {
        RetrievalConfig::new()
            .with_embed_model(self.embed_model.as_str())
            .with_chat_model(self.chat_model.as_str())
            .with_top_k(self.top_k)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> ServerConfig {
        let mut argv = vec!["cohort-rag-server"];
        argv.extend_from_slice(args);
        ServerConfig::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_everything() {
        let config = parse(&[
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--ollama-url",
            "http://gpu-box:11434",
            "--chat-model",
            "llama3.2",
            "--embed-model",
            "all-minilm",
            "--top-k",
            "5",
            "--request-timeout-secs",
            "30",
        ]);

        assert_eq!(config.bind_addr(), "0.0.0.0:8080");
        assert_eq!(config.ollama_client().base_url(), "http://gpu-box:11434");
        assert_eq!(config.request_timeout(), Some(Duration::from_secs(30)));

        let retrieval = config.retrieval_config();
        assert_eq!(retrieval.chat_model, "llama3.2");
        assert_eq!(retrieval.embed_model, "all-minilm");
        assert_eq!(retrieval.top_k, 5);
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ServerConfig::try_parse_from(["cohort-rag-server", "--port", "http"]);
        assert!(result.is_err());
    }
}
