//! Review and writing-style tools.
//!
//! Tools: get_weekly_review, list_weekly_reviews, get_writing_style

use serde_json::json;

use crate::client::{JournalClient, LATEST_REVIEW};
use crate::convert::{
    check_path_id, get_optional_string, get_optional_u64, page_limit, Args,
};
use crate::error::Result;
use crate::render;
use crate::schema;
use crate::tools::ToolDef;

/// Default page size for list_weekly_reviews.
pub const REVIEWS_DEFAULT_LIMIT: u64 = 10;
/// Largest page size list_weekly_reviews will request.
pub const REVIEWS_MAX_LIMIT: u64 = 50;

/// Get all insight tool definitions.
pub fn tools() -> Vec<ToolDef> {
    vec![
        ToolDef::new(
            "get_weekly_review",
            "Get an AI-generated weekly review: a summary of the week's entries, the emotional \
             trend, recurring themes, and insights. Pass a review id as week, or omit it for \
             the most recent review.",
            schema!(object {
                optional: {
                    "week": (json!({
                        "type": "string",
                        "description": "Review id, or 'latest' for the most recent review",
                        "default": LATEST_REVIEW
                    }))
                }
            }),
        ),
        ToolDef::new(
            "list_weekly_reviews",
            "List available weekly reviews, most recent first, with their week range and entry \
             count. Use a returned id with get_weekly_review to read one in full.",
            schema!(object {
                optional: {
                    "limit": (json!({
                        "type": "integer",
                        "minimum": 1,
                        "maximum": REVIEWS_MAX_LIMIT,
                        "default": REVIEWS_DEFAULT_LIMIT
                    })),
                    "offset": (json!({ "type": "integer", "minimum": 0, "default": 0 }))
                }
            }),
        ),
        ToolDef::new(
            "get_writing_style",
            "Get the user's writing style as detected from their entries: a style label, \
             description, voice tone, and suggestions for future writing.",
            schema!(object {}),
        ),
    ]
}

/// Arguments for get_weekly_review.
#[derive(Debug, Clone, PartialEq)]
pub struct WeeklyReviewArgs {
    /// Review id, or [`LATEST_REVIEW`]
    pub week: String,
}

impl WeeklyReviewArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        let week = get_optional_string(args, "week")?
            .filter(|w| !w.trim().is_empty())
            .unwrap_or_else(|| LATEST_REVIEW.to_string());
        check_path_id("week", &week)?;
        Ok(Self { week })
    }
}

/// Arguments for list_weekly_reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct ListReviewsArgs {
    /// Page size, already clamped
    pub limit: u64,
    /// Number of reviews to skip
    pub offset: u64,
}

impl ListReviewsArgs {
    /// Parse from tool call arguments.
    pub fn parse(args: &Args) -> Result<Self> {
        Ok(Self {
            limit: page_limit(
                get_optional_u64(args, "limit")?,
                REVIEWS_DEFAULT_LIMIT,
                REVIEWS_MAX_LIMIT,
            ),
            offset: get_optional_u64(args, "offset")?.unwrap_or(0),
        })
    }
}

/// Fetch and render one weekly review.
pub async fn get_weekly_review(client: &JournalClient, args: WeeklyReviewArgs) -> Result<String> {
    let review = client.get_weekly_review(&args.week).await?;
    Ok(render::weekly_review(&review))
}

/// List one page of weekly reviews.
pub async fn list_weekly_reviews(client: &JournalClient, args: ListReviewsArgs) -> Result<String> {
    let page = client.list_weekly_reviews(args.limit, args.offset).await?;
    Ok(render::review_page(&page))
}

/// Fetch and render the writing style.
pub async fn get_writing_style(client: &JournalClient) -> Result<String> {
    let style = client.get_writing_style().await?;
    Ok(render::writing_style(&style))
}
