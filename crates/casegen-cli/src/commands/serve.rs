//! Serve command implementation.

use crate::cli::ServeArgs;
use crate::error::Result;
use casegen_server::config::ServerConfig;

/// Execute the serve command.
pub async fn execute_serve(args: ServeArgs, mut config: ServerConfig) -> Result<()> {
    if let Some(port) = args.port {
        config.bind_port = port;
    }

    casegen_server::start_server(config).await?;
    Ok(())
}
