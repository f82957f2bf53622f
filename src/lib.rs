//! # journal-mcp
//!
//! MCP (Model Context Protocol) server for a journaling service.
//!
//! This crate exposes the journaling service's REST API as MCP tools and
//! resources for AI agents. It speaks JSON-RPC 2.0 over stdin/stdout and
//! turns every tool call into exactly one authenticated HTTP request, rendering
//! the response as plain text.
//!
//! ## Tools
//!
//! `create_entry`, `finalize_entry`, `list_entries`, `get_entry`,
//! `search_entries`, `get_weekly_review`, `list_weekly_reviews`,
//! `get_writing_style`
//!
//! ## Resources
//!
//! `journal://profile`, `journal://entries/recent`
//!
//! ## Usage
//!
//! ```json
//! {
//!   "mcpServers": {
//!     "journal": {
//!       "command": "/path/to/journal-mcp",
//!       "env": { "JOURNAL_API_KEY": "..." }
//!     }
//!   }
//! }
//! ```
//!
//! ## Library Usage
//!
//! ```no_run
//! use journal_mcp::{ClientConfig, JournalClient, McpServer};
//!
//! # async fn run() -> journal_mcp::Result<()> {
//! let client = JournalClient::new(&ClientConfig::new("api-key"))?;
//! let server = McpServer::new(client);
//! server.run_stdio().await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod client;
mod config;
mod convert;
mod error;
pub mod model;
mod render;
mod resources;
mod server;
mod tools;

pub use client::{JournalClient, API_KEY_HEADER, CLIENT_HEADER, CLIENT_ID, LATEST_REVIEW};
pub use config::{
    ClientConfig, API_KEY_ENV, BASE_URL_ENV, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, TIMEOUT_ENV,
};
pub use error::{McpError, Result};
pub use render::{content_preview, sentiment_label};
pub use resources::{ResourceDef, ResourceKind, ResourceRegistry};
pub use server::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, McpServer, PROTOCOL_VERSION};
pub use tools::{ToolDef, ToolKind, ToolRegistry};
