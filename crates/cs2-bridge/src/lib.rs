//! CS2 bridge for the RCON MCP gateway
//!
//! Provides communication between the MCP server and a Counter-Strike 2
//! dedicated server over the Valve Source RCON protocol:
//!
//! - **Session**: one TCP connection, one authentication, one command per call
//! - **Operations**: raw commands plus status and workshop map helpers
//!
//! No connection is kept between calls, so concurrent tool invocations never
//! share an authenticated socket.

mod bridge;
#[cfg(test)]
mod mock;
mod rcon;

pub use bridge::{
    Cs2Bridge, LIST_WORKSHOP_MAPS_COMMAND, STATUS_COMMAND, host_workshop_map_command,
    workshop_changelevel_command,
};
pub use rcon::{PacketType, RconClient, RconPacket, RconSession};
