//! CS2 RCON MCP Server
//!
//! Exposes a Counter-Strike 2 server's RCON console as MCP tools over
//! HTTP + Server-Sent Events:
//! - RCON target from `HOST`, `SERVER_PORT` and `RCON_PASSWORD`
//! - Gateway bind address from `--host` / `--port`

use anyhow::{Context, Result};
use clap::Parser;
use cs2_bridge::Cs2Bridge;
use rcon_mcp_core::{AppConfig, RconOptions, ServerConfig};
use rcon_mcp_server::RconMcpServer;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "cs2-rcon-mcp")]
#[command(about = "Run the MCP SSE server for a CS2 RCON console", long_about = None)]
struct Cli {
    /// Host to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8080)]
    port: u16,

    /// Enable debug logging
    #[arg(long)]
    debug: bool,

    /// Seconds allowed for opening the RCON connection
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    connect_timeout: u64,

    /// Seconds allowed for authentication plus the complete response
    #[arg(
        long,
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    response_timeout: u64,
}

impl Cli {
    fn app_config(&self) -> AppConfig {
        AppConfig {
            host: self.host.clone(),
            port: self.port,
            debug: self.debug,
        }
    }

    fn rcon_options(&self) -> RconOptions {
        RconOptions {
            connect_timeout: Duration::from_secs(self.connect_timeout),
            response_timeout: Duration::from_secs(self.response_timeout),
            ..Default::default()
        }
    }
}

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let app_config = cli.app_config();
    init_logging(app_config.debug);

    // Fail before binding anything if the RCON target is not configured
    let server_config = ServerConfig::from_env().context("Failed to load server configuration")?;

    info!(
        "Starting CS2 RCON MCP server on {} for RCON at {}",
        app_config.bind_address(),
        server_config.address()
    );

    let bridge = Cs2Bridge::new(server_config, cli.rcon_options());
    RconMcpServer::new(bridge).run_sse(&app_config).await?;

    Ok(())
}
