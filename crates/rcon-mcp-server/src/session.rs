//! Per-client MCP session: request dispatch and the serving loop

use crate::RconMcpServer;
use crate::environment::GameServer;
use crate::mcp::{
    InitializeParams, InitializeResult, Request, RequestId, ResourcesCapability, Response,
    ServerCapabilities, ServerInfo, ToolsCapability, negotiate_protocol_version,
};
use crate::registry::SessionId;
use crate::tools::{handle_tool_call, list_tools};
use rcon_mcp_core::{error_codes, list_all};
use tokio::sync::mpsc;
use tracing::{debug, info};

/// URI of the command catalogue resource
pub const COMMANDS_RESOURCE_URI: &str = "cs2://commands";

/// Lifecycle of one client connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Connecting,
    Open,
    Serving,
    Closing,
    Closed,
}

/// Serve one session until its inbound queue closes
///
/// Messages are handled one at a time in arrival order. The loop ends when
/// the registry drops the inbound sender (client gone or shutdown) or the
/// outbound stream has been dropped.
pub async fn serve_session<E: GameServer>(
    session_id: SessionId,
    mut inbound: mpsc::Receiver<Request>,
    outbound: mpsc::Sender<Response>,
    server: RconMcpServer<E>,
) {
    debug!(session = %session_id, state = ?SessionState::Open, "Session serving loop started");

    while let Some(request) = inbound.recv().await {
        debug!(
            session = %session_id,
            state = ?SessionState::Serving,
            method = %request.method,
            "Received request"
        );

        if let Some(response) = handle_request(&request, &server).await {
            if outbound.send(response).await.is_err() {
                debug!(session = %session_id, "Outbound stream dropped");
                break;
            }
        }
    }

    debug!(session = %session_id, state = ?SessionState::Closing, "Session closing");
    drop(inbound);
    drop(outbound);
    info!(session = %session_id, state = ?SessionState::Closed, "Session ended");
}

/// Handle one JSON-RPC message, returning the response if one is due
pub async fn handle_request<E: GameServer>(
    request: &Request,
    server: &RconMcpServer<E>,
) -> Option<Response> {
    let Some(id) = request.id.clone() else {
        debug!("Notification: {}", request.method);
        return None;
    };

    if request.jsonrpc != "2.0" {
        return Some(Response::error(
            id,
            error_codes::INVALID_REQUEST,
            format!("Unsupported jsonrpc version: {}", request.jsonrpc),
        ));
    }

    let response = match request.method.as_str() {
        "initialize" => handle_initialize(id, request, server),
        "ping" => Response::success(id, serde_json::json!({})),
        "tools/list" => Response::success(id, serde_json::json!({ "tools": list_tools() })),
        "tools/call" => handle_tools_call(id, request, server).await,
        "resources/list" => handle_resources_list(id),
        "resources/read" => handle_resources_read(id, request),
        _ => Response::error(
            id,
            error_codes::METHOD_NOT_FOUND,
            format!("Method not found: {}", request.method),
        ),
    };
    Some(response)
}

fn handle_initialize<E: GameServer>(
    id: RequestId,
    request: &Request,
    server: &RconMcpServer<E>,
) -> Response {
    let params: InitializeParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid initialize params: {}", e),
            );
        }
    };

    info!(
        "Client {} {} initializing (protocol {})",
        params.client_info.name, params.client_info.version, params.protocol_version
    );

    let result = InitializeResult {
        protocol_version: negotiate_protocol_version(&params.protocol_version).to_string(),
        capabilities: ServerCapabilities {
            tools: ToolsCapability {
                list_changed: false,
            },
            resources: ResourcesCapability {
                subscribe: false,
                list_changed: false,
            },
        },
        server_info: ServerInfo {
            name: server.name().to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    match serde_json::to_value(result) {
        Ok(value) => Response::success(id, value),
        Err(e) => Response::error(id, error_codes::INTERNAL_ERROR, e.to_string()),
    }
}

async fn handle_tools_call<E: GameServer>(
    id: RequestId,
    request: &Request,
    server: &RconMcpServer<E>,
) -> Response {
    #[derive(serde::Deserialize)]
    struct ToolCallParams {
        name: String,
        #[serde(default)]
        arguments: serde_json::Value,
    }

    let params: ToolCallParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid tool call params: {}", e),
            );
        }
    };

    handle_tool_call(
        &params.name,
        params.arguments,
        id,
        server.game_server(),
    )
    .await
}

fn handle_resources_list(id: RequestId) -> Response {
    let resources = vec![serde_json::json!({
        "uri": COMMANDS_RESOURCE_URI,
        "name": "CS2 Commands",
        "description": "Common CS2 server console commands and what they do",
        "mimeType": "application/json"
    })];

    Response::success(id, serde_json::json!({ "resources": resources }))
}

fn handle_resources_read(id: RequestId, request: &Request) -> Response {
    #[derive(serde::Deserialize)]
    struct ReadParams {
        uri: String,
    }

    let params: ReadParams = match serde_json::from_value(request.params.clone()) {
        Ok(p) => p,
        Err(e) => {
            return Response::error(
                id,
                error_codes::INVALID_PARAMS,
                format!("Invalid read params: {}", e),
            );
        }
    };

    if params.uri != COMMANDS_RESOURCE_URI {
        return Response::error(
            id,
            error_codes::INVALID_PARAMS,
            format!("Unknown resource: {}", params.uri),
        );
    }

    let content = serde_json::json!(list_all());
    Response::success(
        id,
        serde_json::json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": "application/json",
                "text": content.to_string()
            }]
        }),
    )
}
