use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::dirs;
use crate::error::{Result, SessionError};

/// Output format for the tracing subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// User-configurable settings for the session server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address for the HTTP server (default: 127.0.0.1)
    #[serde(default = "default_host")]
    pub host: String,

    /// Port for the HTTP server (default: 8124)
    #[serde(default = "default_port")]
    pub port: u16,

    /// Path the MCP endpoint is mounted at (default: /mcp/)
    #[serde(default = "default_path")]
    pub path: String,

    /// Name reported in `serverInfo` during initialization
    #[serde(default = "default_server_name")]
    pub server_name: String,

    /// Answer with `application/json` instead of a single-frame SSE stream
    #[serde(default)]
    pub json_response: bool,

    /// Serve without sessions; `get_session_id` then always fails
    #[serde(default)]
    pub stateless: bool,

    /// Idle seconds after which a session is dropped (0 disables expiry)
    #[serde(default = "default_session_idle_timeout_secs")]
    pub session_idle_timeout_secs: u64,

    /// How often the expiry sweeper runs
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,

    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8124
}

fn default_path() -> String {
    "/mcp/".to_string()
}

fn default_server_name() -> String {
    "session-test".to_string()
}

fn default_session_idle_timeout_secs() -> u64 {
    1800
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            path: default_path(),
            server_name: default_server_name(),
            json_response: false,
            stateless: false,
            session_idle_timeout_secs: default_session_idle_timeout_secs(),
            sweep_interval_secs: default_sweep_interval_secs(),
            log_format: LogFormat::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from the default config file path.
    /// Returns default config if the file does not exist.
    pub fn load() -> Result<Self> {
        Self::load_from(&dirs::config_path())
    }

    /// Load configuration from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            SessionError::Config(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        let mut config: ServerConfig = toml::from_str(&content)?;
        config.path = normalize_path(&config.path)?;
        Ok(config)
    }

    /// Save the configuration to an explicit path.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the server bind address string (e.g., "127.0.0.1:8124").
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Full URL clients should connect to.
    pub fn endpoint_url(&self) -> String {
        format!("http://{}{}", self.bind_address(), self.path)
    }
}

/// Ensure the mount path starts with `/`. A trailing slash is preserved.
///
/// `:` and `*` are route-parameter syntax to the router, so a path holding
/// either is rejected rather than mounted as a wildcard.
pub fn normalize_path(path: &str) -> Result<String> {
    let trimmed = path.trim();
    if let Some(bad) = trimmed.chars().find(|c| matches!(c, ':' | '*')) {
        return Err(SessionError::Config(format!(
            "Invalid endpoint path '{trimmed}': '{bad}' is not allowed"
        )));
    }
    if trimmed.is_empty() {
        return Ok("/".to_string());
    }
    if trimmed.starts_with('/') {
        Ok(trimmed.to_string())
    } else {
        Ok(format!("/{trimmed}"))
    }
}
