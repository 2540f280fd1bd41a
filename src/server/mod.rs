pub mod router;
pub mod state;

use std::time::Duration;

use crate::config::{normalize_path, ServerConfig};
use crate::error::{Result, SessionError};
use crate::session;

/// Start the HTTP server with the given configuration and serve until
/// Ctrl-C.
pub async fn start(mut config: ServerConfig) -> Result<()> {
    config.path = normalize_path(&config.path)?;
    let bind_addr = config.bind_address();
    let endpoint = config.endpoint_url();
    let sweep_interval = Duration::from_secs(config.sweep_interval_secs.max(1));
    let app_state = state::AppState::from_config(config);

    tracing::info!(
        tools = app_state.tools.len(),
        stateless = app_state.config.stateless,
        idle_timeout = ?app_state.sessions.idle_timeout(),
        "Initialized session server"
    );

    let sweeper = app_state
        .sessions
        .idle_timeout()
        .map(|_| session::spawn_sweeper(app_state.sessions.clone(), sweep_interval));

    let app = router::build(app_state);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| SessionError::Server(format!("Failed to bind to {bind_addr}: {e}")))?;

    tracing::info!("Server listening on {endpoint}");

    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| SessionError::Server(format!("Server error: {e}")));

    if let Some(handle) = sweeper {
        handle.abort();
    }
    tracing::info!("Server stopped");
    served
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c().await.ok();
    tracing::info!("Shutdown signal received");
}
