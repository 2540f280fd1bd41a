use super::ServeArgs;
use crate::config::{normalize_path, ServerConfig};
use crate::error::Result;
use crate::server;

/// Apply CLI overrides to a loaded configuration.
pub fn apply(mut config: ServerConfig, args: &ServeArgs) -> Result<ServerConfig> {
    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(path) = &args.path {
        config.path = normalize_path(path)?;
    }
    config.json_response |= args.json_response;
    config.stateless |= args.stateless;
    Ok(config)
}

/// Execute the `serve` command: start the HTTP server.
pub async fn execute(config: ServerConfig, args: &ServeArgs) -> Result<()> {
    let config = apply(config, args)?;

    println!("A3S Session server starting...");
    println!("Listening on {}", config.endpoint_url());
    println!("Press Ctrl+C to stop");

    server::start(config).await
}
