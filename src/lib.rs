//! # a3s-session
//!
//! Minimal MCP server that answers one question for its clients: which
//! session am I in?
//!
//! ## Overview
//!
//! Clients speak JSON-RPC 2.0 over the MCP streamable-HTTP transport. An
//! `initialize` request opens a session whose identifier is returned in the
//! `Mcp-Session-Id` header; later requests echo that header back. The single
//! built-in tool, `get_session_id`, returns `{"session_id": "<id>"}`.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use a3s_session::config::ServerConfig;
//!
//! # async fn example() -> a3s_session::Result<()> {
//! let config = ServerConfig::default(); // 127.0.0.1:8124/mcp/
//! a3s_session::server::start(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - **SessionManager** — in-memory session store with idle expiry
//! - **ToolRegistry** — name → handler table built at startup
//! - **RequestContext** — per-call read-only handle on the caller's session
//! - **api** — axum handlers that frame replies as SSE or JSON

pub mod api;
pub mod cli;
pub mod config;
pub mod context;
pub mod dirs;
pub mod error;
pub mod protocol;
pub mod server;
pub mod session;
pub mod tools;

// Re-export core types
pub use config::ServerConfig;
pub use context::RequestContext;
pub use error::{Result, SessionError};
pub use server::state::AppState;
pub use session::{Session, SessionId, SessionManager};
pub use tools::{ToolHandler, ToolRegistry};
