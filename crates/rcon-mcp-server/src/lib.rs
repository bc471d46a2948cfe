//! # rcon-mcp-server
//!
//! MCP server exposing a game server's RCON console as tools.
//!
//! This crate provides:
//! - `GameServer` trait for implementing game adapters
//! - MCP JSON-RPC protocol handling
//! - Tool definitions (rcon, status, workshop maps)
//! - Per-client sessions served over HTTP + Server-Sent Events

pub mod environment;
pub mod mcp;
pub mod registry;
pub mod session;
pub mod tools;
pub mod transport;

pub use environment::GameServer;
pub use registry::SessionRegistry;

use rcon_mcp_core::{AppConfig, Result};
use std::sync::Arc;

/// RCON MCP server
pub struct RconMcpServer<E: GameServer> {
    /// Game server implementation
    game_server: Arc<E>,
}

impl<E: GameServer> Clone for RconMcpServer<E> {
    fn clone(&self) -> Self {
        Self {
            game_server: self.game_server.clone(),
        }
    }
}

impl<E: GameServer> RconMcpServer<E> {
    /// Create a new server around the given game server
    pub fn new(game_server: E) -> Self {
        Self {
            game_server: Arc::new(game_server),
        }
    }

    /// Run the server on the HTTP + SSE transport until Ctrl-C
    pub async fn run_sse(self, config: &AppConfig) -> Result<()> {
        transport::sse::run(self, config).await
    }

    /// The wrapped game server
    pub fn game_server(&self) -> &E {
        &self.game_server
    }

    /// Name reported to clients
    pub fn name(&self) -> &str {
        self.game_server.name()
    }
}
