//! # rcon-mcp-core
//!
//! Core types shared by the RCON MCP gateway crates.
//!
//! This crate provides:
//! - The error taxonomy and JSON-RPC error codes
//! - Server, gateway and RCON timing configuration
//! - The static catalogue of known CS2 console commands

pub mod command;
pub mod config;
pub mod error;

pub use command::{CommandDescriptor, list_all};
pub use config::{AppConfig, RconOptions, ServerConfig};
pub use error::{ErrorKind, RconMcpError, Result, error_codes};
