//! Error types for the RCON MCP gateway

use std::time::Duration;
use thiserror::Error;

/// Result type for gateway operations
pub type Result<T> = std::result::Result<T, RconMcpError>;

/// Gateway error types
#[derive(Debug, Error)]
pub enum RconMcpError {
    /// Missing or invalid startup configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// RCON server rejected the password
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// RCON transport could not be opened or dropped mid-exchange
    #[error("Connection error: {0}")]
    Connection(String),

    /// No complete response within the configured bound
    #[error("Timeout: no response within {0:?}")]
    Timeout(Duration),

    /// An RCON call failed while serving a tool invocation
    #[error("Command '{command}' failed: {source}")]
    CommandExecution {
        command: String,
        #[source]
        source: Box<RconMcpError>,
    },

    /// Tool argument rejected before any network I/O
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// MCP protocol violation
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Coarse classification of an error, used for reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    Authentication,
    Connection,
    Timeout,
    CommandExecution,
    InvalidArgument,
    Protocol,
    Serialization,
}

impl RconMcpError {
    /// Wrap an RCON failure at the dispatcher boundary
    pub fn command_execution(command: impl Into<String>, source: RconMcpError) -> Self {
        RconMcpError::CommandExecution {
            command: command.into(),
            source: Box::new(source),
        }
    }

    /// Classification of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            RconMcpError::Configuration(_) => ErrorKind::Configuration,
            RconMcpError::Authentication(_) => ErrorKind::Authentication,
            RconMcpError::Connection(_) => ErrorKind::Connection,
            RconMcpError::Timeout(_) => ErrorKind::Timeout,
            RconMcpError::CommandExecution { .. } => ErrorKind::CommandExecution,
            RconMcpError::InvalidArgument(_) => ErrorKind::InvalidArgument,
            RconMcpError::Protocol(_) => ErrorKind::Protocol,
            RconMcpError::Serialization(_) => ErrorKind::Serialization,
        }
    }

    /// Kind of the innermost cause, looking through `CommandExecution`
    pub fn root_kind(&self) -> ErrorKind {
        match self {
            RconMcpError::CommandExecution { source, .. } => source.root_kind(),
            other => other.kind(),
        }
    }
}

impl From<serde_json::Error> for RconMcpError {
    fn from(err: serde_json::Error) -> Self {
        RconMcpError::Serialization(err.to_string())
    }
}

/// JSON-RPC error codes
pub mod error_codes {
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}
