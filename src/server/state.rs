use std::sync::Arc;

use crate::config::ServerConfig;
use crate::session::SessionManager;
use crate::tools::ToolRegistry;

/// Shared application state accessible to all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    pub sessions: Arc<SessionManager>,
    pub tools: Arc<ToolRegistry>,
    pub config: Arc<ServerConfig>,
}

impl AppState {
    pub fn new(
        sessions: Arc<SessionManager>,
        tools: Arc<ToolRegistry>,
        config: Arc<ServerConfig>,
    ) -> Self {
        Self {
            sessions,
            tools,
            config,
        }
    }

    /// State wired from config alone, with the built-in tools registered.
    pub fn from_config(config: ServerConfig) -> Self {
        let sessions = Arc::new(SessionManager::from_timeout_secs(
            config.session_idle_timeout_secs,
        ));
        Self::new(
            sessions,
            Arc::new(ToolRegistry::with_defaults()),
            Arc::new(config),
        )
    }
}
