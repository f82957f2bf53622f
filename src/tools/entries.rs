//! Journal entry tools.
//!
//! Tools: create_entry, finalize_entry, list_entries, get_entry, search_entries

use serde_json::json;

use crate::client::JournalClient;
use crate::convert::{
    get_id_arg, get_optional_bool, get_optional_string, get_optional_string_array,
    get_optional_u64, get_string_arg, page_limit, Args,
};
use crate::error::{McpError, Result};
use crate::model::{CreateEntryRequest, EntryStatus, ListEntriesQuery};
use crate::render;
use crate::schema;
use crate::tools::ToolDef;

/// Default page size for list_entries.
pub const LIST_DEFAULT_LIMIT: u64 = 20;
/// Largest page size list_entries will request.
pub const LIST_MAX_LIMIT: u64 = 50;
/// Default result count for search_entries.
pub const SEARCH_DEFAULT_LIMIT: u64 = 10;
/// Largest result count search_entries will request.
pub const SEARCH_MAX_LIMIT: u64 = 20;

fn status_schema() -> serde_json::Value {
    json!({
        "type": "string",
        "enum": EntryStatus::ALL.iter().map(|s| s.as_str()).collect::<Vec<_>>(),
        "description": "Only return entries in this lifecycle state"
    })
}

fn limit_schema(default: u64, max: u64) -> serde_json::Value {
    json!({ "type": "integer", "minimum": 1, "maximum": max, "default": default })
}

/// Get all entry tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "create_entry",
            "Create a new journal entry. The entry starts in the 'in_progress' state and can be \
             finalized later with finalize_entry. Optionally record a mood, tags, and the date \
             the entry is about (YYYY-MM-DD, defaults to today). Returns the new entry's id, \
             title, status, and date.",
            schema!(object {
                required: { "content": string },
                optional: { "mood": string, "tags": array_string, "date": date }
            }),
        ),
        ToolDef::new(
            "finalize_entry",
            "Finalize a journal entry. Generates AI analysis (sentiment, themes, insights) and \
             marks the entry completed. The entry must contain at least 100 characters of \
             content. Returns the analysis.",
            schema!(object {
                required: { "entry_id": string }
            }),
        ),
        ToolDef::new(
            "list_entries",
            "List journal entries, most recent first. Filter by date range (YYYY-MM-DD), \
             status, or tags. Use limit and offset to page through results; the response says \
             which offset to use next when more entries remain.",
            schema!(object {
                optional: {
                    "limit": (limit_schema(LIST_DEFAULT_LIMIT, LIST_MAX_LIMIT)),
                    "offset": (json!({ "type": "integer", "minimum": 0, "default": 0 })),
                    "from_date": date,
                    "to_date": date,
                    "status": (status_schema()),
                    "tags": array_string
                }
            }),
        ),
        ToolDef::new(
            "get_entry",
            "Get a single journal entry with its full content. Includes sentiment, themes, and \
             insights when the entry has been finalized, unless include_analysis is false.",
            schema!(object {
                required: { "entry_id": string },
                optional: { "include_analysis": (json!({ "type": "boolean", "default": true })) }
            }),
        ),
        ToolDef::new(
            "search_entries",
            "Search journal entries by free text. Returns matching entries with a short \
             preview of each entry's content.",
            schema!(object {
                required: { "query": string },
                optional: { "limit": (limit_schema(SEARCH_DEFAULT_LIMIT, SEARCH_MAX_LIMIT)) }
            }),
        ),
    ]
}

// ── Arguments ────────────────────────────────────────────────────────────

/// Arguments for create_entry.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateEntryArgs {
    /// Entry text
    pub content: String,
    /// Mood the user reported
    pub mood: Option<String>,
    /// Tags to attach
    pub tags: Vec<String>,
    /// Day the entry is about (YYYY-MM-DD); the backend defaults it to today
    pub date: Option<String>,
}

impl CreateEntryArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        Ok(Self {
            content: get_string_arg(args, "content")?,
            mood: get_optional_string(args, "mood")?,
            tags: get_optional_string_array(args, "tags")?.unwrap_or_default(),
            date: get_optional_string(args, "date")?,
        })
    }
}

/// Arguments for tools addressing a single entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EntryIdArgs {
    /// Entry to act on
    pub entry_id: String,
}

impl EntryIdArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        Ok(Self {
            entry_id: get_id_arg(args, "entry_id")?,
        })
    }
}

/// Arguments for list_entries.
#[derive(Debug, Clone, PartialEq)]
pub struct ListEntriesArgs {
    /// Page size, already clamped
    pub limit: u64,
    /// Number of entries to skip
    pub offset: u64,
    /// Earliest entry date (inclusive)
    pub from_date: Option<String>,
    /// Latest entry date (inclusive)
    pub to_date: Option<String>,
    /// Lifecycle filter
    pub status: Option<EntryStatus>,
    /// Tag filter
    pub tags: Vec<String>,
}

impl ListEntriesArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        let status = match get_optional_string(args, "status")? {
            Some(s) => Some(EntryStatus::parse(&s).ok_or_else(|| {
                McpError::invalid_arg(
                    "status",
                    format!(
                        "Unknown status '{}'. Use: draft, in_progress, or completed.",
                        s
                    ),
                )
            })?),
            None => None,
        };

        Ok(Self {
            limit: page_limit(
                get_optional_u64(args, "limit")?,
                LIST_DEFAULT_LIMIT,
                LIST_MAX_LIMIT,
            ),
            offset: get_optional_u64(args, "offset")?.unwrap_or(0),
            from_date: get_optional_string(args, "from_date")?,
            to_date: get_optional_string(args, "to_date")?,
            status,
            tags: get_optional_string_array(args, "tags")?.unwrap_or_default(),
        })
    }

    /// Backend query for these arguments.
    pub fn to_query(&self) -> ListEntriesQuery {
        ListEntriesQuery {
            limit: Some(self.limit),
            offset: Some(self.offset),
            from_date: self.from_date.clone(),
            to_date: self.to_date.clone(),
            status: self.status,
            tags: (!self.tags.is_empty()).then(|| self.tags.join(",")),
        }
    }
}

/// Arguments for get_entry.
#[derive(Debug, Clone, PartialEq)]
pub struct GetEntryArgs {
    /// Entry to fetch
    pub entry_id: String,
    /// Whether to request and render the analysis
    pub include_analysis: bool,
}

impl GetEntryArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        Ok(Self {
            entry_id: get_id_arg(args, "entry_id")?,
            include_analysis: get_optional_bool(args, "include_analysis")?.unwrap_or(true),
        })
    }
}

/// Arguments for search_entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchEntriesArgs {
    /// Free-text query
    pub query: String,
    /// Result count, already clamped
    pub limit: u64,
}

impl SearchEntriesArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        Ok(Self {
            query: get_string_arg(args, "query")?,
            limit: page_limit(
                get_optional_u64(args, "limit")?,
                SEARCH_DEFAULT_LIMIT,
                SEARCH_MAX_LIMIT,
            ),
        })
    }
}

// ── Handlers ─────────────────────────────────────────────────────────────

/// Create an entry in the `in_progress` state and echo the settings used.
pub async fn create_entry(client: &JournalClient, args: CreateEntryArgs) -> Result<String> {
    let request = CreateEntryRequest {
        mood: args.mood.clone(),
        tags: args.tags.clone(),
        date: args.date.clone(),
        ..CreateEntryRequest::new(args.content)
    };
    let entry = client.create_entry(&request).await?;

    let mut text = render::created_entry(&entry);

    let mut settings = Vec::new();
    if let Some(mood) = &args.mood {
        settings.push(format!("- Mood: {}", mood));
    }
    if !args.tags.is_empty() {
        settings.push(format!("- Tags: {}", args.tags.join(", ")));
    }
    if let Some(date) = &args.date {
        settings.push(format!("- Date: {}", date));
    }
    if !settings.is_empty() {
        text.push_str("\n\nSettings used:\n");
        text.push_str(&settings.join("\n"));
    }

    Ok(text)
}

/// Finalize an entry and render its analysis.
// Content length is enforced by the backend; its error is passed through.
pub async fn finalize_entry(client: &JournalClient, args: EntryIdArgs) -> Result<String> {
    let entry = client.finalize_entry(&args.entry_id).await?;
    Ok(render::finalized_entry(&entry))
}

/// List one page of entries.
pub async fn list_entries(client: &JournalClient, args: ListEntriesArgs) -> Result<String> {
    let page = client.list_entries(&args.to_query()).await?;
    Ok(render::entry_page(&page))
}

/// Fetch and render a single entry.
pub async fn get_entry(client: &JournalClient, args: GetEntryArgs) -> Result<String> {
    let entry = client
        .get_entry(&args.entry_id, args.include_analysis)
        .await?;
    Ok(render::entry_detail(&entry, args.include_analysis))
}

/// Search entries, rendering a preview of each match.
pub async fn search_entries(client: &JournalClient, args: SearchEntriesArgs) -> Result<String> {
    let page = client.search_entries(&args.query, args.limit).await?;
    Ok(render::search_results(&args.query, &page))
}
