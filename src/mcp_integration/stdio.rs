//! JSON-RPC 2.0 transport for MCP over stdio
//!
//! Messages are newline-delimited JSON objects. Requests (messages with an
//! `id`) get exactly one response line; notifications get none. Blank lines
//! are skipped and end of input stops the server.

use super::core::CatalogMcpServer;
use log::{debug, error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};

pub const JSONRPC_VERSION: &str = "2.0";
/// Protocol version reported when the client does not name one.
pub const DEFAULT_PROTOCOL_VERSION: &str = "2024-11-05";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;
pub const INVALID_PARAMS: i64 = -32602;
pub const INTERNAL_ERROR: i64 = -32603;

/// JSON-RPC response envelope.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    pub id: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    /// `{code, message}` when the request failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl McpResponse {
    pub fn success(id: Value, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    pub fn error(id: Value, code: i64, message: impl Into<String>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            id,
            result: None,
            error: Some(json!({"code": code, "message": message.into()})),
        }
    }
}

impl CatalogMcpServer {
    /// Handle one raw JSON-RPC line.
    ///
    /// Returns `None` for notifications. Unparseable input yields a parse
    /// error response with a `null` id.
    pub async fn handle_mcp_request(&self, line: &str) -> Option<McpResponse> {
        match serde_json::from_str::<Value>(line) {
            Ok(message) => self.handle_message(message).await,
            Err(e) => {
                warn!("Discarding unparseable message: {}", e);
                Some(McpResponse::error(Value::Null, PARSE_ERROR, "Parse error"))
            }
        }
    }

    /// Handle one decoded JSON-RPC message.
    pub async fn handle_message(&self, message: Value) -> Option<McpResponse> {
        let Some(object) = message.as_object() else {
            return Some(McpResponse::error(
                Value::Null,
                INVALID_REQUEST,
                "Invalid Request",
            ));
        };

        let id = object.get("id").cloned();
        let method = object.get("method").and_then(Value::as_str);
        let version_ok = object.get("jsonrpc").and_then(Value::as_str) == Some(JSONRPC_VERSION);

        let (id, method) = match (id, method) {
            (None, Some(method)) => {
                debug!("Received notification: {}", method);
                return None;
            }
            // Responses to requests we never send; nothing to answer.
            (None, None) => return None,
            (Some(id), Some(method)) if version_ok => (id, method),
            (Some(id), _) => {
                return Some(McpResponse::error(id, INVALID_REQUEST, "Invalid Request"));
            }
        };

        let params = object.get("params").cloned().unwrap_or(Value::Null);
        debug!("Handling request {} ({})", method, id);

        let response = match method {
            "initialize" => McpResponse::success(id, self.initialize_result(&params)),
            "ping" => McpResponse::success(id, json!({})),
            "tools/list" => McpResponse::success(id, json!({"tools": self.get_tools()})),
            "tools/call" => self.handle_tools_call(id, &params).await,
            "resources/list" => {
                McpResponse::success(id, json!({"resources": self.list_resources()}))
            }
            "resources/templates/list" => McpResponse::success(
                id,
                json!({"resourceTemplates": self.list_resource_templates()}),
            ),
            "resources/read" => self.handle_resources_read(id, &params).await,
            _ => {
                warn!("Method not found: {}", method);
                McpResponse::error(id, METHOD_NOT_FOUND, "Method not found")
            }
        };
        Some(response)
    }

    fn initialize_result(&self, params: &Value) -> Value {
        let protocol_version = params
            .get("protocolVersion")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_PROTOCOL_VERSION);
        if let Some(client) = params.get("clientInfo") {
            info!("Client connected: {}", client);
        }

        json!({
            "protocolVersion": protocol_version,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": self.server_info.name,
                "version": self.server_info.version
            },
            "instructions": self.server_info.description
        })
    }

    async fn handle_tools_call(&self, id: Value, params: &Value) -> McpResponse {
        let Some(name) = params.get("name").and_then(Value::as_str) else {
            return McpResponse::error(id, INVALID_PARAMS, "Invalid params: missing tool name");
        };
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let result = self.execute_tool(name, arguments).await;
        let text = serde_json::to_string_pretty(&result.content)
            .unwrap_or_else(|_| result.content.to_string());

        let mut payload = json!({
            "content": [{"type": "text", "text": text}],
            "isError": !result.success
        });
        if let Some(metadata) = result.metadata {
            payload["_meta"] = metadata;
        }
        McpResponse::success(id, payload)
    }

    async fn handle_resources_read(&self, id: Value, params: &Value) -> McpResponse {
        let Some(uri) = params.get("uri").and_then(Value::as_str) else {
            return McpResponse::error(id, INVALID_PARAMS, "Invalid params: missing uri");
        };

        match self.read_resource(uri).await {
            Ok(value) => {
                let text =
                    serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                McpResponse::success(
                    id,
                    json!({
                        "contents": [{
                            "uri": uri,
                            "mimeType": "application/json",
                            "text": text
                        }]
                    }),
                )
            }
            Err(e) if e.is_client_error() => McpResponse::error(id, INVALID_PARAMS, e.to_string()),
            Err(e) => {
                error!("Failed to read resource {}: {}", uri, e);
                McpResponse::error(id, INTERNAL_ERROR, e.to_string())
            }
        }
    }

    /// Serve newline-delimited JSON-RPC from `reader`, answering on `writer`.
    ///
    /// Returns when `reader` reaches end of input.
    pub async fn serve<R, W>(&self, mut reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break;
            }

            let response = match std::str::from_utf8(&buf) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    self.handle_mcp_request(trimmed).await
                }
                Err(e) => {
                    warn!("Discarding non-UTF-8 message: {}", e);
                    Some(McpResponse::error(Value::Null, PARSE_ERROR, "Parse error"))
                }
            };

            if let Some(response) = response {
                let mut payload = serde_json::to_string(&response)?;
                payload.push('\n');
                writer.write_all(payload.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        Ok(())
    }

    /// Run the MCP server using stdio communication
    ///
    /// Reads requests from standard input and writes responses to standard
    /// output until standard input closes. Logs must go to stderr.
    pub async fn run_stdio(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        info!("ServiceNow catalog MCP server ready for stdio communication");
        info!(
            "Available tools: {:?}",
            self.get_tools()
                .iter()
                .filter_map(|t| t.get("name").and_then(Value::as_str))
                .collect::<Vec<_>>()
        );

        let stdin = BufReader::new(tokio::io::stdin());
        self.serve(stdin, tokio::io::stdout()).await?;

        info!("stdin closed, shutting down");
        Ok(())
    }
}
