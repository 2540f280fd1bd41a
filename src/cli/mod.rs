pub mod serve;

use clap::{Parser, Subcommand};

/// A3S Session - MCP server that tells clients which session they are in
#[derive(Debug, Parser)]
#[command(name = "a3s-session", version, about)]
pub struct Cli {
    /// Path to a config file (default: ~/.a3s/session/config.toml)
    #[arg(long, global = true)]
    pub config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP server
    Serve(ServeArgs),
}

/// Overrides applied on top of the loaded configuration.
#[derive(Debug, Default, clap::Args)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(long)]
    pub port: Option<u16>,

    /// Path to mount the MCP endpoint at
    #[arg(long)]
    pub path: Option<String>,

    /// Reply with plain JSON instead of SSE
    #[arg(long)]
    pub json_response: bool,

    /// Serve without sessions
    #[arg(long)]
    pub stateless: bool,
}
