use clap::Parser;
use tracing_subscriber::EnvFilter;

use a3s_session::cli::{Cli, Commands, ServeArgs};
use a3s_session::config::{LogFormat, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => ServerConfig::load_from(path)?,
        None => ServerConfig::load()?,
    };

    // Initialize tracing
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match config.log_format {
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }

    match cli.command {
        Some(Commands::Serve(args)) => {
            a3s_session::cli::serve::execute(config, &args).await?;
        }
        None => {
            a3s_session::cli::serve::execute(config, &ServeArgs::default()).await?;
        }
    }

    Ok(())
}
