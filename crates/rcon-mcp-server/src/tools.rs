//! MCP tool handlers for the RCON gateway

use rcon_mcp_core::{RconMcpError, Result, error_codes};
use serde::{Deserialize, Serialize};

use crate::environment::GameServer;
use crate::mcp::{RequestId, Response};

/// Tool definition for MCP tools/list
#[derive(Debug, Clone, Serialize)]
pub struct ToolDef {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

/// Get list of available tools
pub fn list_tools() -> Vec<ToolDef> {
    vec![
        ToolDef {
            name: "rcon".into(),
            description: "Execute an RCON command on the CS2 server and return its output. Example: {\"command\": \"mp_warmup_end\"}".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "command": {
                        "type": "string",
                        "description": "Console command sent verbatim, e.g. \"bot_kick\" or \"mp_restartgame 1\""
                    }
                },
                "required": ["command"]
            }),
        },
        ToolDef {
            name: "status".into(),
            description: "Get the current status of the CS2 server (map, players, hostname).".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDef {
            name: "list_workshop_maps".into(),
            description: "List all workshop maps in the collection hosted by the CS2 server.".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {}
            }),
        },
        ToolDef {
            name: "host_workshop_map".into(),
            description: "Host a workshop map by its id on the CS2 server. Example: {\"workshop_map_id\": 3070284539}".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "workshop_map_id": {
                        "type": "integer",
                        "minimum": 0,
                        "description": "Steam workshop id of the map"
                    }
                },
                "required": ["workshop_map_id"]
            }),
        },
        ToolDef {
            name: "workshop_changelevel".into(),
            description: "Change the map to a given workshop map from the hosted collection. Example: {\"workshop_map_name\": \"de_dust2_workshop\"}".into(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "workshop_map_name": {
                        "type": "string",
                        "description": "Map name as shown by list_workshop_maps"
                    }
                },
                "required": ["workshop_map_name"]
            }),
        },
    ]
}

/// Parameters for rcon
#[derive(Debug, Deserialize)]
pub struct RconParams {
    pub command: String,
}

/// Parameters for host_workshop_map
#[derive(Debug, Deserialize)]
pub struct HostWorkshopMapParams {
    pub workshop_map_id: u64,
}

/// Parameters for workshop_changelevel
#[derive(Debug, Deserialize)]
pub struct WorkshopChangelevelParams {
    pub workshop_map_name: String,
}

/// Handle a tools/call request
///
/// Unknown tools and undecodable arguments are JSON-RPC errors. Anything that
/// goes wrong while running the command is reported as a tool result with
/// `isError` set, so the failure stays local to this invocation.
pub async fn handle_tool_call<E: GameServer>(
    name: &str,
    params: serde_json::Value,
    id: RequestId,
    server: &E,
) -> Response {
    match call_tool(name, params, server).await {
        Ok(text) => Response::success(id, tool_result(text, false)),
        Err(e @ (RconMcpError::Protocol(_) | RconMcpError::Serialization(_))) => {
            Response::error(id, error_codes::INVALID_PARAMS, e.to_string())
        }
        Err(e) => {
            tracing::warn!("Tool '{}' failed: {}", name, e);
            Response::success(id, tool_result(e.to_string(), true))
        }
    }
}

fn tool_result(text: String, is_error: bool) -> serde_json::Value {
    serde_json::json!({
        "content": [{ "type": "text", "text": text }],
        "isError": is_error
    })
}

async fn call_tool<E: GameServer>(
    name: &str,
    params: serde_json::Value,
    server: &E,
) -> Result<String> {
    match name {
        "rcon" => {
            let p: RconParams = serde_json::from_value(params)?;
            server.execute(&p.command).await
        }
        "status" => server.status().await,
        "list_workshop_maps" => server.list_workshop_maps().await,
        "host_workshop_map" => {
            let p: HostWorkshopMapParams = serde_json::from_value(params)?;
            server.host_workshop_map(p.workshop_map_id).await
        }
        "workshop_changelevel" => {
            let p: WorkshopChangelevelParams = serde_json::from_value(params)?;
            server.workshop_changelevel(&p.workshop_map_name).await
        }
        _ => Err(RconMcpError::Protocol(format!("Unknown tool: {}", name))),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Records calls and answers with canned text
    #[derive(Default)]
    pub(crate) struct RecordingServer {
        pub calls: Mutex<Vec<String>>,
        pub fail: bool,
    }

    impl RecordingServer {
        fn record(&self, call: String) -> Result<String> {
            self.calls.lock().unwrap().push(call.clone());
            if self.fail {
                Err(RconMcpError::command_execution(
                    call,
                    RconMcpError::Connection("connection refused".into()),
                ))
            } else {
                Ok(format!("ok: {}", call))
            }
        }
    }

    #[async_trait]
    impl GameServer for RecordingServer {
        async fn execute(&self, command: &str) -> Result<String> {
            self.record(command.to_string())
        }
        async fn status(&self) -> Result<String> {
            self.record("status".into())
        }
        async fn list_workshop_maps(&self) -> Result<String> {
            self.record("ds_workshop_listmaps".into())
        }
        async fn host_workshop_map(&self, workshop_map_id: u64) -> Result<String> {
            self.record(format!("host_workshop_map {}", workshop_map_id))
        }
        async fn workshop_changelevel(&self, workshop_map_name: &str) -> Result<String> {
            self.record(format!("ds_workshop_changelevel {}", workshop_map_name))
        }
        fn name(&self) -> &str {
            "Recording"
        }
    }

    fn text_of(resp: &Response) -> &str {
        resp.result.as_ref().unwrap()["content"][0]["text"]
            .as_str()
            .unwrap()
    }

    #[test]
    fn test_list_tools_names() {
        let names: Vec<_> = list_tools().into_iter().map(|t| t.name).collect();
        assert_eq!(
            names,
            [
                "rcon",
                "status",
                "list_workshop_maps",
                "host_workshop_map",
                "workshop_changelevel"
            ]
        );
    }

    #[tokio::test]
    async fn test_tools_route_to_operations() {
        let server = RecordingServer::default();

        let resp = handle_tool_call("status", json!({}), RequestId::Number(1), &server).await;
        assert_eq!(text_of(&resp), "ok: status");

        let resp = handle_tool_call(
            "host_workshop_map",
            json!({ "workshop_map_id": 12345 }),
            RequestId::Number(2),
            &server,
        )
        .await;
        assert_eq!(text_of(&resp), "ok: host_workshop_map 12345");
        assert_eq!(resp.result.as_ref().unwrap()["isError"], false);

        handle_tool_call(
            "rcon",
            json!({ "command": "bot_kick" }),
            RequestId::Number(3),
            &server,
        )
        .await;
        assert_eq!(
            *server.calls.lock().unwrap(),
            ["status", "host_workshop_map 12345", "bot_kick"]
        );
    }

    #[tokio::test]
    async fn test_negative_workshop_id_is_invalid_params() {
        let server = RecordingServer::default();
        let resp = handle_tool_call(
            "host_workshop_map",
            json!({ "workshop_map_id": -5 }),
            RequestId::Number(1),
            &server,
        )
        .await;

        assert_eq!(resp.error.unwrap().code, error_codes::INVALID_PARAMS);
        assert!(server.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let server = RecordingServer::default();
        let resp = handle_tool_call("noclip", json!({}), RequestId::Number(1), &server).await;
        let err = resp.error.unwrap();
        assert_eq!(err.code, error_codes::INVALID_PARAMS);
        assert!(err.message.contains("noclip"));
    }

    #[tokio::test]
    async fn test_execution_failure_is_tool_error() {
        let server = RecordingServer {
            fail: true,
            ..Default::default()
        };
        let resp = handle_tool_call("status", json!({}), RequestId::Number(9), &server).await;

        assert!(resp.error.is_none());
        assert_eq!(resp.result.as_ref().unwrap()["isError"], true);
        assert!(text_of(&resp).contains("connection refused"));
    }
}
