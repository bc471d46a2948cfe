//! Transports carrying MCP messages to and from clients

pub mod sse;
