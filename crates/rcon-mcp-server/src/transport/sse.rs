//! HTTP + Server-Sent Events transport for MCP
//!
//! A client opens `GET /cs2server/sse` and receives an `endpoint` event naming
//! the URL to post its JSON-RPC messages to. Responses come back on the same
//! event stream as `message` events.

use crate::RconMcpServer;
use crate::environment::GameServer;
use crate::mcp::{Request, Response};
use crate::registry::{SessionId, SessionRegistry};
use crate::session::{SessionState, serve_session};
use axum::{
    Router,
    body::Bytes,
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    routing::{get, post},
};
use futures_util::stream::{self, Stream, StreamExt};
use rcon_mcp_core::{AppConfig, RconMcpError, Result};
use serde::Deserialize;
use std::convert::Infallible;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Path of the server-to-client event stream
pub const SSE_PATH: &str = "/cs2server/sse";
/// Path clients post their messages to
pub const MESSAGES_PATH: &str = "/cs2server/messages/";

const SESSION_QUEUE_DEPTH: usize = 32;

struct GatewayState<E: GameServer> {
    server: RconMcpServer<E>,
    sessions: Arc<SessionRegistry>,
}

impl<E: GameServer> Clone for GatewayState<E> {
    fn clone(&self) -> Self {
        Self {
            server: self.server.clone(),
            sessions: self.sessions.clone(),
        }
    }
}

/// Removes the session from the registry when the event stream is dropped
struct SessionGuard {
    session_id: SessionId,
    sessions: Arc<SessionRegistry>,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        if self.sessions.remove(&self.session_id) {
            info!(session = %self.session_id, "SSE client disconnected");
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    session_id: Option<String>,
}

/// Build the gateway routes
pub fn router<E: GameServer>(server: RconMcpServer<E>, sessions: Arc<SessionRegistry>) -> Router {
    Router::new()
        .route(SSE_PATH, get(handle_sse::<E>))
        .route(MESSAGES_PATH, post(handle_message::<E>))
        .with_state(GatewayState { server, sessions })
}

/// Bind the configured address and serve until Ctrl-C
pub async fn run<E: GameServer>(server: RconMcpServer<E>, config: &AppConfig) -> Result<()> {
    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|e| RconMcpError::Connection(format!("Failed to bind {}: {}", address, e)))?;

    serve(server, listener, shutdown_signal()).await
}

/// Serve on an already bound listener until `shutdown` resolves
///
/// On shutdown every session is closed so that open event streams end and
/// the graceful drain can finish.
pub async fn serve<E, F>(server: RconMcpServer<E>, listener: TcpListener, shutdown: F) -> Result<()>
where
    E: GameServer,
    F: Future<Output = ()> + Send + 'static,
{
    let sessions = Arc::new(SessionRegistry::new());
    let app = router(server, sessions.clone());

    if let Ok(addr) = listener.local_addr() {
        info!("MCP SSE endpoint listening on http://{}{}", addr, SSE_PATH);
    }

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.await;
            info!("Shutting down, closing {} session(s)", sessions.count());
            sessions.close_all();
        })
        .await
        .map_err(|e| RconMcpError::Connection(format!("Server error: {}", e)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn handle_sse<E: GameServer>(
    State(state): State<GatewayState<E>>,
) -> Sse<impl Stream<Item = std::result::Result<Event, Infallible>>> {
    let session_id = Uuid::new_v4();
    debug!(session = %session_id, state = ?SessionState::Connecting, "New SSE connection");

    let (inbound_tx, inbound_rx) = mpsc::channel::<Request>(SESSION_QUEUE_DEPTH);
    let (outbound_tx, outbound_rx) = mpsc::channel::<Response>(SESSION_QUEUE_DEPTH);

    state.sessions.register(session_id, inbound_tx);
    tokio::spawn(serve_session(
        session_id,
        inbound_rx,
        outbound_tx,
        state.server.clone(),
    ));
    info!(session = %session_id, state = ?SessionState::Open, "SSE session opened");

    let endpoint = Event::default()
        .event("endpoint")
        .data(format!("{}?session_id={}", MESSAGES_PATH, session_id.simple()));

    let guard = SessionGuard {
        session_id,
        sessions: state.sessions.clone(),
    };
    let messages = stream::unfold((outbound_rx, guard), |(mut rx, guard)| async move {
        let response = rx.recv().await?;
        Some((Ok::<_, Infallible>(message_event(&response)), (rx, guard)))
    });

    let events = stream::once(async move { Ok::<_, Infallible>(endpoint) }).chain(messages);
    Sse::new(events).keep_alive(KeepAlive::default())
}

fn message_event(response: &Response) -> Event {
    match serde_json::to_string(response) {
        Ok(json) => Event::default().event("message").data(json),
        Err(e) => {
            warn!("Failed to serialize response: {}", e);
            Event::default().comment("serialization failed")
        }
    }
}

async fn handle_message<E: GameServer>(
    State(state): State<GatewayState<E>>,
    Query(query): Query<MessageQuery>,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let Some(raw_id) = query.session_id else {
        return (StatusCode::BAD_REQUEST, "session_id is required");
    };
    let Ok(session_id) = Uuid::parse_str(&raw_id) else {
        return (StatusCode::BAD_REQUEST, "Invalid session ID");
    };
    let Some(inbound) = state.sessions.sender(&session_id) else {
        warn!(session = %session_id, "Message for unknown session");
        return (StatusCode::NOT_FOUND, "Could not find session");
    };

    let request: Request = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            warn!(session = %session_id, "Failed to parse message: {}", e);
            return (StatusCode::BAD_REQUEST, "Could not parse message");
        }
    };

    if inbound.send(request).await.is_err() {
        return (StatusCode::NOT_FOUND, "Could not find session");
    }
    (StatusCode::ACCEPTED, "Accepted")
}
