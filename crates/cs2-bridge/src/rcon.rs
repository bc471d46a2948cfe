//! Source RCON protocol client for CS2
//!
//! Implements the Valve Source RCON protocol used by Counter-Strike 2 dedicated servers.
//! Protocol spec: https://developer.valvesoftware.com/wiki/Source_RCON_Protocol

use rcon_mcp_core::{RconMcpError, RconOptions, Result, ServerConfig};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// RCON packet type constants
pub mod packet_type {
    /// Command output
    pub const RESPONSE_VALUE: i32 = 0;
    /// Authentication response / Execute command (context-dependent)
    pub const EXEC_COMMAND: i32 = 2;
    pub const AUTH_RESPONSE: i32 = 2;
    /// Authenticate with password
    pub const AUTH: i32 = 3;
}

/// Id the server puts in an auth response when the password is wrong
const AUTH_FAILED_ID: i32 = -1;

/// Largest inbound packet accepted (size field, excluding itself)
const MAX_PACKET_SIZE: usize = 64 * 1024;

/// id(4) + type(4) + two null terminators
const MIN_PACKET_SIZE: usize = 10;

/// RCON packet types for creating packets
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PacketType {
    /// Execute a command
    ExecCommand,
    /// Authenticate with password
    Auth,
    /// Command output
    ResponseValue,
}

impl PacketType {
    /// Get the wire protocol value
    pub fn as_i32(self) -> i32 {
        match self {
            PacketType::ExecCommand => packet_type::EXEC_COMMAND,
            PacketType::Auth => packet_type::AUTH,
            PacketType::ResponseValue => packet_type::RESPONSE_VALUE,
        }
    }
}

/// A single RCON packet
#[derive(Debug, Clone, PartialEq)]
pub struct RconPacket {
    pub id: i32,
    pub packet_type: i32,
    pub body: Vec<u8>,
}

impl RconPacket {
    /// Create a new packet
    pub fn new(id: i32, packet_type: PacketType, body: impl AsRef<[u8]>) -> Self {
        Self {
            id,
            packet_type: packet_type.as_i32(),
            body: body.as_ref().to_vec(),
        }
    }

    /// Serialize packet to bytes
    pub fn to_bytes(&self) -> Vec<u8> {
        // Size = id(4) + type(4) + body + null(1) + null(1)
        let size = 4 + 4 + self.body.len() + 2;

        let mut buf = Vec::with_capacity(4 + size);
        buf.extend_from_slice(&(size as i32).to_le_bytes());
        buf.extend_from_slice(&self.id.to_le_bytes());
        buf.extend_from_slice(&self.packet_type.to_le_bytes());
        buf.extend_from_slice(&self.body);
        buf.push(0); // Body null terminator
        buf.push(0); // Packet null terminator

        buf
    }

    /// Parse packet from bytes (excluding size prefix)
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        if data.len() < MIN_PACKET_SIZE {
            return Err(RconMcpError::Connection(format!(
                "malformed RCON packet: {} bytes",
                data.len()
            )));
        }

        let id = i32::from_le_bytes([data[0], data[1], data[2], data[3]]);
        let packet_type = i32::from_le_bytes([data[4], data[5], data[6], data[7]]);

        // Body is everything after type until the first null
        let body_end = data[8..]
            .iter()
            .position(|&b| b == 0)
            .unwrap_or(data.len() - 8);

        Ok(Self {
            id,
            packet_type,
            body: data[8..8 + body_end].to_vec(),
        })
    }

    /// Body decoded as text
    pub fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Read one length-prefixed packet
pub async fn read_packet<R: AsyncRead + Unpin>(reader: &mut R) -> Result<RconPacket> {
    // Read size (4 bytes, little endian)
    let mut size_buf = [0u8; 4];
    reader
        .read_exact(&mut size_buf)
        .await
        .map_err(|e| RconMcpError::Connection(format!("RCON recv size failed: {}", e)))?;
    let size = i32::from_le_bytes(size_buf);

    if size < MIN_PACKET_SIZE as i32 || size as usize > MAX_PACKET_SIZE {
        return Err(RconMcpError::Connection(format!(
            "RCON packet size out of range: {} bytes",
            size
        )));
    }

    let mut data = vec![0u8; size as usize];
    reader
        .read_exact(&mut data)
        .await
        .map_err(|e| RconMcpError::Connection(format!("RCON recv body failed: {}", e)))?;

    RconPacket::from_bytes(&data)
}

/// Write one packet and flush
pub async fn write_packet<W: AsyncWrite + Unpin>(writer: &mut W, packet: &RconPacket) -> Result<()> {
    writer
        .write_all(&packet.to_bytes())
        .await
        .map_err(|e| RconMcpError::Connection(format!("RCON send failed: {}", e)))?;
    writer
        .flush()
        .await
        .map_err(|e| RconMcpError::Connection(format!("RCON flush failed: {}", e)))?;
    Ok(())
}

/// One authenticated exchange over an owned byte stream
///
/// Only one request is outstanding at a time. The stream is released when
/// the session is closed or dropped.
pub struct RconSession<S> {
    stream: S,
    next_id: i32,
    fragment_threshold: usize,
}

impl<S: AsyncRead + AsyncWrite + Unpin> RconSession<S> {
    /// Wrap a freshly opened stream
    pub fn new(stream: S, fragment_threshold: usize) -> Self {
        Self {
            stream,
            next_id: 1,
            fragment_threshold,
        }
    }

    fn next_id(&mut self) -> i32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Perform the password handshake
    pub async fn authenticate(&mut self, password: &str) -> Result<()> {
        let auth_id = self.next_id();
        write_packet(
            &mut self.stream,
            &RconPacket::new(auth_id, PacketType::Auth, password),
        )
        .await?;

        loop {
            let response = read_packet(&mut self.stream).await?;
            match response.packet_type {
                // Source servers send an empty response value ahead of the auth result
                packet_type::RESPONSE_VALUE => {
                    debug!("Skipping pre-auth response value (id {})", response.id);
                }
                packet_type::AUTH_RESPONSE => {
                    if response.id == AUTH_FAILED_ID {
                        return Err(RconMcpError::Authentication(
                            "RCON authentication failed".to_string(),
                        ));
                    }
                    if response.id != auth_id {
                        warn!(
                            "Skipping RCON auth response with foreign id: expected {}, got {}",
                            auth_id, response.id
                        );
                        continue;
                    }
                    debug!("RCON authenticated");
                    return Ok(());
                }
                other => {
                    return Err(RconMcpError::Connection(format!(
                        "unexpected RCON packet type {} during auth",
                        other
                    )));
                }
            }
        }
    }

    /// Send one command and reassemble its response
    pub async fn exec(&mut self, command: &str) -> Result<String> {
        let cmd_id = self.next_id();
        debug!("RCON exec: {}", command);
        write_packet(
            &mut self.stream,
            &RconPacket::new(cmd_id, PacketType::ExecCommand, command),
        )
        .await?;

        let first = self.read_reply(cmd_id).await?;
        let mut body = first.body;

        if body.len() >= self.fragment_threshold {
            // Follow a long reply with an empty command. Every packet carrying
            // our id before the answer to it is part of the same reply.
            let marker_id = self.next_id();
            write_packet(
                &mut self.stream,
                &RconPacket::new(marker_id, PacketType::ExecCommand, ""),
            )
            .await?;

            loop {
                let packet = read_packet(&mut self.stream).await?;
                if packet.id != cmd_id {
                    debug!("RCON reply for {} ended at packet id {}", cmd_id, packet.id);
                    break;
                }
                body.extend_from_slice(&packet.body);
            }
        }

        let text = String::from_utf8_lossy(&body).into_owned();
        debug!("RCON response: {}", text.chars().take(100).collect::<String>());
        Ok(text)
    }

    async fn read_reply(&mut self, cmd_id: i32) -> Result<RconPacket> {
        loop {
            let packet = read_packet(&mut self.stream).await?;
            if packet.id == cmd_id {
                return Ok(packet);
            }
            debug!(
                "Response ID mismatch: expected {}, got {}",
                cmd_id, packet.id
            );
        }
    }

    /// Authenticate then run a single command
    pub async fn run(&mut self, password: &str, command: &str) -> Result<String> {
        self.authenticate(password).await?;
        self.exec(command).await
    }

    /// Shut the stream down
    pub async fn close(mut self) {
        let _ = self.stream.shutdown().await;
    }
}

/// RCON client for a CS2 dedicated server
///
/// Every call opens its own connection, authenticates, runs one command and
/// closes. Nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct RconClient {
    config: ServerConfig,
    options: RconOptions,
}

impl RconClient {
    /// Create a new RCON client
    pub fn new(config: ServerConfig, options: RconOptions) -> Self {
        Self { config, options }
    }

    /// Execute a command and return the response
    pub async fn execute(&self, command: &str) -> Result<String> {
        let address = self.config.address();
        debug!("Connecting to RCON at {}", address);

        let stream = match timeout(self.options.connect_timeout, TcpStream::connect(&address)).await
        {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(RconMcpError::Connection(format!(
                    "RCON connect to {} failed: {}",
                    address, e
                )));
            }
            Err(_) => {
                return Err(RconMcpError::Connection(format!(
                    "RCON connect to {} timed out after {:?}",
                    address, self.options.connect_timeout
                )));
            }
        };

        let mut session = RconSession::new(stream, self.options.fragment_threshold);
        let outcome = timeout(
            self.options.response_timeout,
            session.run(&self.config.password, command),
        )
        .await;
        session.close().await;

        match outcome {
            Ok(Ok(response)) => {
                info!("RCON command '{}' completed ({} bytes)", command, response.len());
                Ok(response)
            }
            Ok(Err(e)) => Err(e),
            Err(_) => Err(RconMcpError::Timeout(self.options.response_timeout)),
        }
    }
}
