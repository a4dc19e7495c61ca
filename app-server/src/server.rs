use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::ServerConfig;
use crate::routes;
use crate::state::AppState;

/// Bind, serve until Ctrl+C, then drain in-flight requests.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let state = AppState::new(
        config.ollama_client(),
        config.retrieval_config(),
        config.request_timeout(),
    );
    let app = routes::create_routes(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("API listening on http://{addr}");
    info!("Using Ollama at {}", config.ollama_url);
    info!("Default chat model: {}", config.chat_model);
    info!("Default embed model: {}", config.embed_model);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown requested"),
        Err(err) => {
            warn!(error = %err, "Cannot listen for Ctrl+C; serving until killed");
            std::future::pending::<()>().await;
        }
    }
}
