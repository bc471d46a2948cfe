//! CS2 bridge implementing the GameServer trait
//!
//! Each operation maps to exactly one RCON call and never retries.

use crate::rcon::RconClient;
use async_trait::async_trait;
use rcon_mcp_core::{RconMcpError, RconOptions, Result, ServerConfig};
use rcon_mcp_server::GameServer;
use tracing::{error, info};

/// Console command reporting server status
pub const STATUS_COMMAND: &str = "status";
/// Console command listing the hosted workshop collection
pub const LIST_WORKSHOP_MAPS_COMMAND: &str = "ds_workshop_listmaps";

const SERVER_NAME: &str = "CS2 MCP-Server";

/// Command text that hosts a workshop map
pub fn host_workshop_map_command(workshop_map_id: u64) -> String {
    format!("host_workshop_map {}", workshop_map_id)
}

/// Command text that changes level within the hosted workshop collection
pub fn workshop_changelevel_command(workshop_map_name: &str) -> String {
    format!("ds_workshop_changelevel {}", workshop_map_name)
}

/// Reject text that would break the line-oriented console
fn validate_text<'a>(field: &str, value: &'a str) -> Result<&'a str> {
    if value.trim().is_empty() {
        return Err(RconMcpError::InvalidArgument(format!(
            "{} must not be empty",
            field
        )));
    }
    if value.chars().any(char::is_control) {
        return Err(RconMcpError::InvalidArgument(format!(
            "{} must not contain control characters",
            field
        )));
    }
    Ok(value)
}

/// Bridge to a CS2 dedicated server via RCON
pub struct Cs2Bridge {
    rcon: RconClient,
}

impl Cs2Bridge {
    /// Create a bridge for the given server
    pub fn new(config: ServerConfig, options: RconOptions) -> Self {
        info!(
            "CS2 bridge targeting {} (connect timeout {:?}, response timeout {:?})",
            config.address(),
            options.connect_timeout,
            options.response_timeout
        );
        Self {
            rcon: RconClient::new(config, options),
        }
    }

    async fn run(&self, command: String) -> Result<String> {
        self.rcon.execute(&command).await.map_err(|e| {
            error!("Failed to execute RCON command '{}': {}", command, e);
            RconMcpError::command_execution(command, e)
        })
    }
}

#[async_trait]
impl GameServer for Cs2Bridge {
    async fn execute(&self, command: &str) -> Result<String> {
        let command = validate_text("command", command)?;
        self.run(command.to_string()).await
    }

    async fn status(&self) -> Result<String> {
        self.run(STATUS_COMMAND.to_string()).await
    }

    async fn list_workshop_maps(&self) -> Result<String> {
        self.run(LIST_WORKSHOP_MAPS_COMMAND.to_string()).await
    }

    async fn host_workshop_map(&self, workshop_map_id: u64) -> Result<String> {
        self.run(host_workshop_map_command(workshop_map_id)).await
    }

    async fn workshop_changelevel(&self, workshop_map_name: &str) -> Result<String> {
        let name = validate_text("workshop_map_name", workshop_map_name)?;
        self.run(workshop_changelevel_command(name)).await
    }

    fn name(&self) -> &str {
        SERVER_NAME
    }
}
