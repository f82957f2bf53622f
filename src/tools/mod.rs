//! Tool registry and dispatch.
//!
//! Tool names resolve once, at registry construction, into a [`ToolKind`]
//! lookup table. Every call parses its arguments into a typed struct before
//! making exactly one backend request.

pub mod entries;
pub mod insights;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::client::JournalClient;
use crate::convert::Args;
use crate::error::{McpError, Result};

/// A tool definition for the MCP tools/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDef {
    /// Tool name (e.g., "create_entry")
    pub name: String,
    /// Tool description
    pub description: String,
    /// JSON Schema for the input parameters
    #[serde(rename = "inputSchema")]
    pub input_schema: JsonValue,
}

impl ToolDef {
    /// Create a new tool definition.
    pub fn new(name: &str, description: &str, input_schema: JsonValue) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input_schema,
        }
    }
}

/// Every tool the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    /// create_entry
    CreateEntry,
    /// finalize_entry
    FinalizeEntry,
    /// list_entries
    ListEntries,
    /// get_entry
    GetEntry,
    /// search_entries
    SearchEntries,
    /// get_weekly_review
    GetWeeklyReview,
    /// list_weekly_reviews
    ListWeeklyReviews,
    /// get_writing_style
    GetWritingStyle,
}

impl ToolKind {
    /// All tools, in catalog order.
    pub const ALL: [ToolKind; 8] = [
        ToolKind::CreateEntry,
        ToolKind::FinalizeEntry,
        ToolKind::ListEntries,
        ToolKind::GetEntry,
        ToolKind::SearchEntries,
        ToolKind::GetWeeklyReview,
        ToolKind::ListWeeklyReviews,
        ToolKind::GetWritingStyle,
    ];

    /// Wire name of the tool.
    pub fn name(&self) -> &'static str {
        match self {
            ToolKind::CreateEntry => "create_entry",
            ToolKind::FinalizeEntry => "finalize_entry",
            ToolKind::ListEntries => "list_entries",
            ToolKind::GetEntry => "get_entry",
            ToolKind::SearchEntries => "search_entries",
            ToolKind::GetWeeklyReview => "get_weekly_review",
            ToolKind::ListWeeklyReviews => "list_weekly_reviews",
            ToolKind::GetWritingStyle => "get_writing_style",
        }
    }

    /// Whether calling this tool changes backend state.
    pub fn is_write(&self) -> bool {
        matches!(self, ToolKind::CreateEntry | ToolKind::FinalizeEntry)
    }
}

/// Registry of available MCP tools.
pub struct ToolRegistry {
    tools: Vec<ToolDef>,
    by_name: HashMap<&'static str, ToolKind>,
}

impl ToolRegistry {
    /// Create the registry with every journal tool.
    pub fn new() -> Self {
        let mut tools = entries::tools();
        tools.extend(insights::tools());

        let by_name = ToolKind::ALL.iter().map(|kind| (kind.name(), *kind)).collect();

        Self { tools, by_name }
    }

    /// Get all tool definitions.
    pub fn tools(&self) -> &[ToolDef] {
        &self.tools
    }

    /// Resolve a tool name.
    pub fn resolve(&self, name: &str) -> Result<ToolKind> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| McpError::UnknownTool(name.to_string()))
    }

    /// Dispatch a tool call to the appropriate handler, returning rendered text.
    ///
    /// Unknown names and invalid arguments fail before any backend request.
    pub async fn dispatch(&self, client: &JournalClient, name: &str, args: Args) -> Result<String> {
        let kind = self.resolve(name)?;
        debug!(tool = name, write = kind.is_write(), "dispatching tool call");

        match kind {
            ToolKind::CreateEntry => {
                entries::create_entry(client, entries::CreateEntryArgs::parse(&args)?).await
            }
            ToolKind::FinalizeEntry => {
                entries::finalize_entry(client, entries::EntryIdArgs::parse(&args)?).await
            }
            ToolKind::ListEntries => {
                entries::list_entries(client, entries::ListEntriesArgs::parse(&args)?).await
            }
            ToolKind::GetEntry => {
                entries::get_entry(client, entries::GetEntryArgs::parse(&args)?).await
            }
            ToolKind::SearchEntries => {
                entries::search_entries(client, entries::SearchEntriesArgs::parse(&args)?).await
            }
            ToolKind::GetWeeklyReview => {
                insights::get_weekly_review(client, insights::WeeklyReviewArgs::parse(&args)?)
                    .await
            }
            ToolKind::ListWeeklyReviews => {
                insights::list_weekly_reviews(client, insights::ListReviewsArgs::parse(&args)?)
                    .await
            }
            ToolKind::GetWritingStyle => insights::get_writing_style(client).await,
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper macro for creating JSON Schema for tool input parameters.
#[macro_export]
macro_rules! schema {
    // Object with required and optional properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? },
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {{
        let required: Vec<&str> = vec![$($req_name),*];

        let mut props = serde_json::Map::new();
        $(props.insert($req_name.to_string(), $crate::schema!(@type $req_type));)*
        $(props.insert($opt_name.to_string(), $crate::schema!(@type $opt_type));)*

        serde_json::json!({
            "type": "object",
            "properties": props,
            "required": required
        })
    }};

    // Object with only required properties
    (object {
        required: { $($req_name:literal : $req_type:tt),* $(,)? }
    }) => {
        $crate::schema!(object { required: { $($req_name : $req_type),* }, optional: {} })
    };

    // Object with only optional properties
    (object {
        optional: { $($opt_name:literal : $opt_type:tt),* $(,)? }
    }) => {
        $crate::schema!(object { required: {}, optional: { $($opt_name : $opt_type),* } })
    };

    // Empty object (no parameters)
    (object {}) => {{
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }};

    // Type mappings; a parenthesized expression is used as-is
    (@type string) => { serde_json::json!({"type": "string"}) };
    (@type integer) => { serde_json::json!({"type": "integer"}) };
    (@type boolean) => { serde_json::json!({"type": "boolean"}) };
    (@type date) => { serde_json::json!({"type": "string", "format": "date"}) };
    (@type array_string) => { serde_json::json!({"type": "array", "items": {"type": "string"}}) };
    (@type ($custom:expr)) => { $custom };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_definition_resolves_to_its_kind() {
        let registry = ToolRegistry::new();
        assert_eq!(registry.tools().len(), ToolKind::ALL.len());
        for def in registry.tools() {
            let kind = registry.resolve(&def.name).unwrap();
            assert_eq!(kind.name(), def.name);
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let registry = ToolRegistry::new();
        assert!(matches!(
            registry.resolve("delete_entry"),
            Err(McpError::UnknownTool(ref n)) if n == "delete_entry"
        ));
    }

    #[test]
    fn only_create_and_finalize_write() {
        let writes: Vec<_> = ToolKind::ALL
            .iter()
            .filter(|k| k.is_write())
            .map(|k| k.name())
            .collect();
        assert_eq!(writes, vec!["create_entry", "finalize_entry"]);
    }

    #[test]
    fn schema_macro_lists_required_fields() {
        let schema = schema!(object {
            required: { "query": string },
            optional: { "limit": integer, "since": date }
        });
        assert_eq!(schema["required"], serde_json::json!(["query"]));
        assert_eq!(schema["properties"]["since"]["format"], "date");
        assert_eq!(schema!(object {})["required"], serde_json::json!([]));
    }
}
