//! MCP server over newline-delimited JSON-RPC 2.0.
//!
//! Handles the MCP lifecycle (`initialize`, `ping`, notifications) and the
//! four capability requests: `tools/list`, `tools/call`, `resources/list`,
//! `resources/read`. Requests are processed one at a time in arrival order.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value as JsonValue};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

use crate::client::JournalClient;
use crate::error::{McpError, Result, INTERNAL_ERROR};
use crate::resources::ResourceRegistry;
use crate::tools::ToolRegistry;

/// MCP protocol revision implemented by this server.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

const SERVER_NAME: &str = "journal-mcp";

const INSTRUCTIONS: &str = "Tools for reading and writing the user's journal. Create entries \
    with create_entry and finalize them with finalize_entry once they have at least 100 \
    characters. Read journal://profile for context about the user.";

/// An inbound JSON-RPC request or notification.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcRequest {
    /// Protocol version, must be "2.0"
    pub jsonrpc: String,
    /// Request id; absent for notifications
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<JsonValue>,
    /// Method name
    pub method: String,
    /// Method parameters
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params: Option<JsonValue>,
}

impl JsonRpcRequest {
    /// Build a request with the given id.
    pub fn new(id: impl Into<JsonValue>, method: &str, params: Option<JsonValue>) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id: Some(id.into()),
            method: method.to_string(),
            params,
        }
    }

    /// Whether this is a notification (no response expected).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// A JSON-RPC error object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// Error code
    pub code: i64,
    /// Human-readable message
    pub message: String,
}

impl From<&McpError> for JsonRpcError {
    fn from(err: &McpError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

/// An outbound JSON-RPC response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JsonRpcResponse {
    /// Protocol version, always "2.0"
    pub jsonrpc: String,
    /// Id of the request this answers; null if it could not be read
    pub id: JsonValue,
    /// Result on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    /// Error on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<JsonRpcError>,
}

impl JsonRpcResponse {
    /// A success response.
    pub fn success(id: JsonValue, result: JsonValue) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(result),
            error: None,
        }
    }

    /// An error response.
    pub fn error(id: JsonValue, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(error),
        }
    }
}

/// MCP server bridging agent requests to the journaling backend.
pub struct McpServer {
    client: JournalClient,
    tools: ToolRegistry,
    resources: ResourceRegistry,
}

impl McpServer {
    /// Create a server owning the given client.
    pub fn new(client: JournalClient) -> Self {
        Self {
            client,
            tools: ToolRegistry::new(),
            resources: ResourceRegistry::new(),
        }
    }

    /// The tool registry.
    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// The resource registry.
    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    /// Serve requests from stdin until EOF.
    pub async fn run_stdio(&self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let stdout = tokio::io::stdout();
        self.run(stdin, stdout).await
    }

    /// Serve newline-delimited requests from `reader`, writing responses to `writer`.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();
        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            if let Some(response) = self.handle_line(&line).await {
                let mut out = serde_json::to_string(&response)?;
                out.push('\n');
                writer.write_all(out.as_bytes()).await?;
                writer.flush().await?;
            }
        }
        info!("input closed, stopping server");
        Ok(())
    }

    /// Handle one raw input line.
    pub async fn handle_line(&self, line: &str) -> Option<JsonRpcResponse> {
        match serde_json::from_str::<JsonRpcRequest>(line) {
            Ok(request) => self.handle(request).await,
            Err(e) => {
                warn!(error = %e, "unparseable request");
                let err = McpError::Parse(e.to_string());
                Some(JsonRpcResponse::error(JsonValue::Null, (&err).into()))
            }
        }
    }

    /// Handle one request. Returns `None` for notifications.
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!(method = %request.method, "notification");
            return None;
        }
        let id = request.id.clone().unwrap_or(JsonValue::Null);

        if request.jsonrpc != "2.0" {
            let err = McpError::InvalidRequest(format!(
                "unsupported jsonrpc version '{}'",
                request.jsonrpc
            ));
            return Some(JsonRpcResponse::error(id, (&err).into()));
        }

        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::error(id, error),
        };
        Some(response)
    }

    async fn dispatch(
        &self,
        method: &str,
        params: Option<JsonValue>,
    ) -> std::result::Result<JsonValue, JsonRpcError> {
        match method {
            "initialize" => Ok(self.initialize(params.as_ref())),
            "ping" => Ok(serde_json::json!({})),
            "tools/list" => Ok(serde_json::json!({ "tools": self.tools.tools() })),
            "resources/list" => Ok(serde_json::json!({ "resources": self.resources.resources() })),
            "tools/call" => self.call_tool(params).await,
            "resources/read" => self.read_resource(params).await,
            other => Err((&McpError::MethodNotFound(other.to_string())).into()),
        }
    }

    fn initialize(&self, params: Option<&JsonValue>) -> JsonValue {
        let client_name = params
            .and_then(|p| p.pointer("/clientInfo/name"))
            .and_then(|n| n.as_str())
            .unwrap_or("unknown");
        info!(client = client_name, "client connected");

        serde_json::json!({
            "protocolVersion": PROTOCOL_VERSION,
            "capabilities": {
                "tools": {},
                "resources": {}
            },
            "serverInfo": {
                "name": SERVER_NAME,
                "version": env!("CARGO_PKG_VERSION")
            },
            "instructions": INSTRUCTIONS
        })
    }

    async fn call_tool(
        &self,
        params: Option<JsonValue>,
    ) -> std::result::Result<JsonValue, JsonRpcError> {
        let mut params = object_params(params)?;
        let name = take_string(&mut params, "name")?;
        let args = match params.remove("arguments") {
            None | Some(JsonValue::Null) => Map::new(),
            Some(JsonValue::Object(map)) => map,
            Some(_) => {
                return Err((&McpError::invalid_arg("arguments", "expected an object")).into())
            }
        };

        match self.tools.dispatch(&self.client, &name, args).await {
            Ok(text) => Ok(serde_json::json!({
                "content": [{ "type": "text", "text": text }]
            })),
            Err(err) => {
                warn!(tool = %name, error = %err, "tool call failed");
                Err(wrap_internal(&format!("tool '{}' failed", name), &err))
            }
        }
    }

    async fn read_resource(
        &self,
        params: Option<JsonValue>,
    ) -> std::result::Result<JsonValue, JsonRpcError> {
        let mut params = object_params(params)?;
        let uri = take_string(&mut params, "uri")?;

        match self.resources.read(&self.client, &uri).await {
            Ok(text) => Ok(serde_json::json!({
                "contents": [{ "uri": uri, "mimeType": "text/plain", "text": text }]
            })),
            Err(err) => {
                warn!(%uri, error = %err, "resource read failed");
                Err(wrap_internal(&format!("resource '{}' failed", uri), &err))
            }
        }
    }
}

/// Internal errors carry the original message behind a context prefix;
/// lookup and argument errors keep their own code and message.
fn wrap_internal(context: &str, err: &McpError) -> JsonRpcError {
    let mut error = JsonRpcError::from(err);
    if error.code == INTERNAL_ERROR {
        error.message = format!("{}: {}", context, err);
    }
    error
}

fn object_params(
    params: Option<JsonValue>,
) -> std::result::Result<Map<String, JsonValue>, JsonRpcError> {
    match params {
        Some(JsonValue::Object(map)) => Ok(map),
        _ => Err((&McpError::InvalidRequest("params must be an object".to_string())).into()),
    }
}

fn take_string(
    params: &mut Map<String, JsonValue>,
    name: &str,
) -> std::result::Result<String, JsonRpcError> {
    match params.remove(name) {
        Some(JsonValue::String(s)) => Ok(s),
        Some(_) => Err((&McpError::invalid_arg(name, "expected a string")).into()),
        None => Err((&McpError::MissingArg(name.to_string())).into()),
    }
}
