//! Error types for a3s-session

use axum::http::StatusCode;
use thiserror::Error;

/// JSON-RPC 2.0 error codes used by the MCP dispatcher.
pub mod codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
    /// Transport-level rejection (no session on a session-bound request)
    pub const BAD_REQUEST: i32 = -32000;
    pub const SESSION_NOT_FOUND: i32 = -32001;
}

/// Errors that can occur while serving sessions
#[derive(Debug, Error)]
pub enum SessionError {
    /// The request context carries no resolved session
    #[error("No active session")]
    NoActiveSession,

    /// The client referenced a session that does not exist or has expired
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// `tools/call` named a tool that is not registered
    #[error("Unknown tool: {0}")]
    ToolNotFound(String),

    /// Structurally valid JSON that is not an acceptable request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    /// Body could not be parsed as JSON-RPC
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Server error: {0}")]
    Server(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("TOML deserialization error: {0}")]
    TomlDe(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;

impl SessionError {
    /// JSON-RPC error code reported to the client.
    pub fn rpc_code(&self) -> i32 {
        match self {
            SessionError::NoActiveSession => codes::BAD_REQUEST,
            SessionError::SessionNotFound(_) => codes::SESSION_NOT_FOUND,
            SessionError::ToolNotFound(_) => codes::INVALID_PARAMS,
            SessionError::InvalidRequest(_) => codes::INVALID_REQUEST,
            SessionError::MethodNotFound(_) => codes::METHOD_NOT_FOUND,
            SessionError::InvalidParams(_) => codes::INVALID_PARAMS,
            SessionError::Parse(_) => codes::PARSE_ERROR,
            _ => codes::INTERNAL_ERROR,
        }
    }

    /// HTTP status used when the error rejects the whole request.
    pub fn status(&self) -> StatusCode {
        match self {
            SessionError::NoActiveSession
            | SessionError::InvalidRequest(_)
            | SessionError::Parse(_) => StatusCode::BAD_REQUEST,
            SessionError::SessionNotFound(_) => StatusCode::NOT_FOUND,
            SessionError::ToolNotFound(_)
            | SessionError::MethodNotFound(_)
            | SessionError::InvalidParams(_) => StatusCode::OK,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message sent on the wire. Transport rejections carry the
    /// `Bad Request:` prefix clients key off.
    pub fn rpc_message(&self) -> String {
        match self {
            SessionError::NoActiveSession => format!("Bad Request: {self}"),
            _ => self.to_string(),
        }
    }
}
