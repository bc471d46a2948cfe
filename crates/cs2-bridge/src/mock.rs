//! In-process Source RCON server for tests

use crate::rcon::{PacketType, RconPacket, packet_type, read_packet, write_packet};
use rcon_mcp_core::ServerConfig;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::{TcpListener, TcpStream};
use tokio::sync::Notify;

/// How the mock answers exec packets
#[derive(Debug, Clone, Copy)]
pub enum MockReply {
    /// Reply with `echo: <command>`
    Echo,
    /// Reply with `echo: <command>` after a delay
    Delayed(Duration),
    /// Authenticate but never answer commands
    Silent,
    /// Reply with this many bytes, split into packets of at most 4096
    Long(usize),
}

const MAX_BODY: usize = 4096;

#[derive(Default)]
struct Shared {
    commands: Mutex<Vec<String>>,
    closed: Mutex<usize>,
    closed_notify: Notify,
}

pub struct MockServer {
    port: u16,
    shared: Arc<Shared>,
}

impl MockServer {
    pub async fn start(password: &'static str, reply: MockReply) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let port = listener.local_addr().unwrap().port();
        let shared = Arc::new(Shared::default());

        let accept_shared = shared.clone();
        tokio::spawn(async move {
            while let Ok((stream, _)) = listener.accept().await {
                let shared = accept_shared.clone();
                tokio::spawn(async move {
                    serve(stream, password, reply, &shared).await;
                    *shared.closed.lock().unwrap() += 1;
                    shared.closed_notify.notify_waiters();
                });
            }
        });

        Self { port, shared }
    }

    pub fn config(&self, password: &str) -> ServerConfig {
        ServerConfig::new("127.0.0.1", self.port, password).unwrap()
    }

    /// Exec bodies received so far
    pub fn commands(&self) -> Vec<String> {
        self.shared.commands.lock().unwrap().clone()
    }

    /// Resolve once `count` client connections have reached EOF
    pub async fn wait_closed(&self, count: usize) {
        loop {
            let notified = self.shared.closed_notify.notified();
            if *self.shared.closed.lock().unwrap() >= count {
                return;
            }
            notified.await;
        }
    }
}

async fn serve(mut stream: TcpStream, password: &str, reply: MockReply, shared: &Shared) {
    while let Ok(packet) = read_packet(&mut stream).await {
        let answers = match packet.packet_type {
            packet_type::AUTH => {
                let id = if packet.body == password.as_bytes() {
                    packet.id
                } else {
                    -1
                };
                vec![
                    RconPacket::new(packet.id, PacketType::ResponseValue, ""),
                    RconPacket {
                        id,
                        packet_type: packet_type::AUTH_RESPONSE,
                        body: Vec::new(),
                    },
                ]
            }
            packet_type::EXEC_COMMAND if packet.body.is_empty() => {
                vec![RconPacket::new(packet.id, PacketType::ResponseValue, "")]
            }
            packet_type::EXEC_COMMAND => {
                let command = packet.body_text();
                shared.commands.lock().unwrap().push(command.clone());
                match reply {
                    MockReply::Echo => vec![echo(packet.id, &command)],
                    MockReply::Delayed(delay) => {
                        tokio::time::sleep(delay).await;
                        vec![echo(packet.id, &command)]
                    }
                    MockReply::Silent => continue,
                    MockReply::Long(len) => vec![b'x'; len]
                        .chunks(MAX_BODY)
                        .map(|chunk| RconPacket::new(packet.id, PacketType::ResponseValue, chunk))
                        .collect(),
                }
            }
            // Response-value packets go unanswered
            _ => continue,
        };

        if !write_all(&mut stream, answers).await {
            return;
        }
    }
}

fn echo(id: i32, command: &str) -> RconPacket {
    RconPacket::new(id, PacketType::ResponseValue, format!("echo: {}", command))
}

async fn write_all(stream: &mut TcpStream, answers: Vec<RconPacket>) -> bool {
    for answer in answers {
        if write_packet(stream, &answer).await.is_err() {
            return false;
        }
    }
    true
}
