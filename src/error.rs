//! Error types for the MCP server.

use thiserror::Error;

/// JSON-RPC error code: invalid JSON was received.
pub const PARSE_ERROR: i64 = -32700;
/// JSON-RPC error code: the request object is not valid.
pub const INVALID_REQUEST: i64 = -32600;
/// JSON-RPC error code: the method (or tool) does not exist.
pub const METHOD_NOT_FOUND: i64 = -32601;
/// JSON-RPC error code: invalid method parameters.
pub const INVALID_PARAMS: i64 = -32602;
/// JSON-RPC error code: internal error.
pub const INTERNAL_ERROR: i64 = -32603;
/// MCP error code: the requested resource does not exist.
pub const RESOURCE_NOT_FOUND: i64 = -32002;

/// Result type for MCP operations.
pub type Result<T> = std::result::Result<T, McpError>;

/// Errors raised while serving MCP requests.
#[derive(Debug, Error)]
pub enum McpError {
    /// Missing or invalid configuration. Fatal at startup.
    #[error("configuration error: {0}")]
    Config(String),

    /// The backend answered with a failure status or an error envelope.
    #[error("journal API error ({status}): {message}")]
    Backend {
        /// HTTP status of the response
        status: u16,
        /// Message extracted from the backend error body
        message: String,
    },

    /// No response was received from the backend.
    #[error("unable to reach the journal API at {url}: {reason}. Check your network connection and JOURNAL_API_URL")]
    Unreachable {
        /// URL that was requested
        url: String,
        /// Transport-level failure description
        reason: String,
    },

    /// Any other local failure while forming or interpreting a request.
    #[error("request failed: {0}")]
    Request(String),

    /// The requested tool is not in the catalog.
    #[error("unknown tool: {0}")]
    UnknownTool(String),

    /// The requested resource URI is not in the catalog.
    #[error("resource not found: {0}")]
    ResourceNotFound(String),

    /// A required argument was not supplied.
    #[error("missing required argument: {0}")]
    MissingArg(String),

    /// An argument had the wrong type or an out-of-range value.
    #[error("invalid argument '{name}': {reason}")]
    InvalidArg {
        /// Argument name
        name: String,
        /// What was wrong with it
        reason: String,
    },

    /// Inbound message was not valid JSON.
    #[error("parse error: {0}")]
    Parse(String),

    /// Inbound message was JSON but not a valid JSON-RPC request.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// The JSON-RPC method is not supported.
    #[error("method not found: {0}")]
    MethodNotFound(String),

    /// I/O failure on the stdio transport.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization failure.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i64 {
        match self {
            McpError::Parse(_) => PARSE_ERROR,
            McpError::InvalidRequest(_) => INVALID_REQUEST,
            McpError::MethodNotFound(_) | McpError::UnknownTool(_) => METHOD_NOT_FOUND,
            McpError::MissingArg(_) | McpError::InvalidArg { .. } => INVALID_PARAMS,
            McpError::ResourceNotFound(_) => RESOURCE_NOT_FOUND,
            McpError::Config(_)
            | McpError::Backend { .. }
            | McpError::Unreachable { .. }
            | McpError::Request(_)
            | McpError::Io(_)
            | McpError::Json(_) => INTERNAL_ERROR,
        }
    }

    /// Shorthand for an [`McpError::InvalidArg`].
    pub fn invalid_arg(name: &str, reason: impl Into<String>) -> Self {
        McpError::InvalidArg {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

/// Render an error followed by its `source()` chain, joined with `": "`.
fn with_sources(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let cause_text = cause.to_string();
        if !message.contains(&cause_text) {
            message.push_str(": ");
            message.push_str(&cause_text);
        }
        source = cause.source();
    }
    message
}

impl From<reqwest::Error> for McpError {
    fn from(err: reqwest::Error) -> Self {
        let url = err
            .url()
            .map(|u| u.to_string())
            .unwrap_or_else(|| "<unknown>".to_string());
        let reason = with_sources(&err);

        // A send that failed without any status line means nothing came back
        let no_response = err.is_request() && err.status().is_none();
        if err.is_connect() || err.is_timeout() || no_response {
            McpError::Unreachable { url, reason }
        } else if let Some(status) = err.status() {
            McpError::Backend {
                status: status.as_u16(),
                message: reason,
            }
        } else {
            McpError::Request(reason)
        }
    }
}
