//! Transfer shapes for the journaling backend.
//!
//! Every record is owned by the backend and only lives for the duration of a
//! single request. Wire names are camelCase; missing collections deserialize
//! as empty.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a journal entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryStatus {
    /// Saved but not yet being written
    Draft,
    /// Being written; the state every new entry starts in
    InProgress,
    /// Finalized and analyzed
    Completed,
}

impl EntryStatus {
    /// All statuses, in lifecycle order.
    pub const ALL: [EntryStatus; 3] = [
        EntryStatus::Draft,
        EntryStatus::InProgress,
        EntryStatus::Completed,
    ];

    /// Wire representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            EntryStatus::Draft => "draft",
            EntryStatus::InProgress => "in_progress",
            EntryStatus::Completed => "completed",
        }
    }

    /// Parse a wire representation.
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|status| status.as_str() == s)
    }
}

impl fmt::Display for EntryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// AI analysis attached to a finalized entry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryAnalysis {
    /// Sentiment in `[-1, 1]`
    #[serde(default)]
    pub sentiment_score: Option<f64>,
    /// Recurring themes
    #[serde(default)]
    pub themes: Vec<String>,
    /// Observations about the entry; the first is the key insight
    #[serde(default)]
    pub insights: Vec<String>,
}

/// A journal entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JournalEntry {
    /// Backend-assigned id
    pub id: String,
    /// Title, generated by the backend
    #[serde(default)]
    pub title: String,
    /// Entry text
    #[serde(default)]
    pub content: String,
    /// Mood the user reported
    #[serde(default)]
    pub mood: Option<String>,
    /// User tags
    #[serde(default)]
    pub tags: Vec<String>,
    /// Lifecycle state
    pub status: EntryStatus,
    /// Day the entry is about (YYYY-MM-DD)
    #[serde(default)]
    pub date: String,
    /// Creation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
    /// Last update timestamp
    #[serde(default)]
    pub updated_at: Option<String>,
    /// Present once the entry has been finalized
    #[serde(default)]
    pub analysis: Option<EntryAnalysis>,
}

/// An AI-generated review of one week of entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReview {
    /// Review id
    pub id: String,
    /// First day of the week (YYYY-MM-DD)
    pub week_start: String,
    /// Last day of the week (YYYY-MM-DD)
    pub week_end: String,
    /// Narrative summary of the week
    #[serde(default)]
    pub summary: String,
    /// Themes across the week's entries
    #[serde(default)]
    pub themes: Vec<String>,
    /// How mood moved over the week
    #[serde(default)]
    pub emotional_trend: Option<String>,
    /// Observations about the week
    #[serde(default)]
    pub insights: Vec<String>,
    /// Entries the review covers
    #[serde(default)]
    pub entry_count: u64,
    /// Generation timestamp
    #[serde(default)]
    pub created_at: Option<String>,
}

/// The authenticated user's profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User id
    pub id: String,
    /// Display name
    pub username: String,
    /// Contact address
    #[serde(default)]
    pub email: Option<String>,
    /// IANA timezone name
    #[serde(default)]
    pub timezone: Option<String>,
    /// Date of the first entry
    #[serde(default)]
    pub journaling_since: Option<String>,
    /// Entries written so far
    #[serde(default)]
    pub total_entries: u64,
    /// Consecutive days with an entry
    #[serde(default)]
    pub current_streak: u64,
    /// Style the user chose, if any
    #[serde(default)]
    pub preferred_writing_style: Option<String>,
}

/// The user's detected writing style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WritingStyle {
    /// Style label
    pub current_style: String,
    /// What the style means
    #[serde(default)]
    pub description: Option<String>,
    /// Detected voice tone
    #[serde(default)]
    pub voice_tone: Option<String>,
    /// Suggestions for future entries
    #[serde(default)]
    pub suggestions: Vec<String>,
}

/// Pagination block attached to list responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    /// Items matching the query across all pages
    pub total: u64,
    /// Requested page size
    pub limit: u64,
    /// Index of the first item on this page
    pub offset: u64,
    /// As reported by the backend; [`Page::has_more`] derives its own.
    #[serde(default)]
    pub has_more: bool,
}

/// One page of a list result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// Items on this page
    pub items: Vec<T>,
    /// Position of this page in the full result
    pub pagination: Pagination,
}

impl<T> Page<T> {
    /// Whether more items exist past this page.
    pub fn has_more(&self) -> bool {
        self.pagination.offset + (self.items.len() as u64) < self.pagination.total
    }

    /// Offset of the first item on the following page.
    pub fn next_offset(&self) -> u64 {
        self.pagination.offset + self.items.len() as u64
    }
}

/// Uniform response wrapper used by every backend endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Envelope<T> {
    /// `"success"` or `"error"`
    pub status: String,
    /// Payload, absent on errors
    pub data: Option<T>,
    /// Human-readable message
    #[serde(default)]
    pub message: Option<String>,
}

/// Error body returned with non-2xx responses.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ErrorBody {
    /// Preferred message field
    #[serde(default)]
    pub message: Option<String>,
    /// Fallback used by some endpoints
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    /// The most specific message the body carries.
    pub fn into_message(self) -> Option<String> {
        self.message.or(self.error).filter(|m| !m.is_empty())
    }
}

/// Body of `POST /entries`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateEntryRequest {
    /// Entry text
    pub content: String,
    /// Initial lifecycle state
    pub status: EntryStatus,
    /// Mood the user reported
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood: Option<String>,
    /// Tags to attach
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Day the entry is about (YYYY-MM-DD)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl CreateEntryRequest {
    /// A new entry request. New entries always start `in_progress`.
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            status: EntryStatus::InProgress,
            mood: None,
            tags: Vec::new(),
            date: None,
        }
    }
}

/// Query parameters for `GET /entries`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListEntriesQuery {
    /// Page size
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    /// Number of entries to skip
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
    /// Earliest entry date (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// Latest entry date (inclusive)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
    /// Lifecycle filter
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<EntryStatus>,
    /// Comma-joined on the wire.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<String>,
}
