//! Game server trait

use async_trait::async_trait;
use rcon_mcp_core::Result;

/// Operations a remotely administered game server exposes as MCP tools
///
/// Implement this trait to put a game server behind the gateway. Every
/// method performs at most one remote call and never retries; failures come
/// back as `RconMcpError::CommandExecution` carrying the original cause.
#[async_trait]
pub trait GameServer: Send + Sync + 'static {
    /// Forward a raw console command verbatim
    async fn execute(&self, command: &str) -> Result<String>;

    /// Current server status
    async fn status(&self) -> Result<String>;

    /// Maps in the hosted workshop collection
    async fn list_workshop_maps(&self) -> Result<String>;

    /// Host a workshop map by id
    async fn host_workshop_map(&self, workshop_map_id: u64) -> Result<String>;

    /// Change level to a map from the hosted workshop collection
    async fn workshop_changelevel(&self, workshop_map_name: &str) -> Result<String>;

    /// Name reported in the MCP handshake
    fn name(&self) -> &str;
}
