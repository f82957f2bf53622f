//! HTTP client for the journaling backend.
//!
//! One method per backend endpoint. Every method returns the unwrapped `data`
//! payload of the backend's `{status, data, message}` envelope and normalizes
//! failures into [`McpError::Backend`], [`McpError::Unreachable`] or
//! [`McpError::Request`].

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client as HttpClient, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, warn};

use crate::config::ClientConfig;
use crate::convert::check_path_id;
use crate::error::{McpError, Result};
use crate::model::{
    CreateEntryRequest, Envelope, ErrorBody, JournalEntry, ListEntriesQuery, Page, UserProfile,
    WeeklyReview, WritingStyle,
};

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-api-key";
/// Header carrying the client identifier.
pub const CLIENT_HEADER: &str = "x-client";
/// Client identifier sent with every request.
pub const CLIENT_ID: &str = concat!("journal-mcp/", env!("CARGO_PKG_VERSION"));

/// Sentinel review id resolving to the most recent weekly review.
pub const LATEST_REVIEW: &str = "latest";

/// Authenticated client for the journaling REST API.
///
/// Immutable after construction; clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct JournalClient {
    http: HttpClient,
    base_url: Url,
}

impl JournalClient {
    /// Create a client, failing fast on a missing API key or bad base URL.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let base_url = config.validate()?;

        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&config.api_key)
            .map_err(|_| McpError::Config("API key contains invalid characters".to_string()))?;
        key.set_sensitive(true);
        headers.insert(API_KEY_HEADER, key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(CLIENT_HEADER, HeaderValue::from_static(CLIENT_ID));

        let http = HttpClient::builder()
            .user_agent(CLIENT_ID)
            .default_headers(headers)
            .timeout(config.timeout)
            .build()
            .map_err(|e| McpError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http, base_url })
    }

    /// The base URL requests are sent to.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// List entries matching the given filters.
    pub async fn list_entries(&self, query: &ListEntriesQuery) -> Result<Page<JournalEntry>> {
        self.get(&["entries"], Some(query)).await
    }

    /// Get a single entry.
    pub async fn get_entry(&self, id: &str, include_analysis: bool) -> Result<JournalEntry> {
        self.get(
            &["entries", id],
            Some(&[("include_analysis", include_analysis)]),
        )
        .await
    }

    /// Create a new entry.
    pub async fn create_entry(&self, request: &CreateEntryRequest) -> Result<JournalEntry> {
        self.request(Method::POST, &["entries"], None::<&()>, Some(request))
            .await
    }

    /// Free-text search over entries.
    pub async fn search_entries(&self, query: &str, limit: u64) -> Result<Page<JournalEntry>> {
        let limit = limit.to_string();
        self.get(
            &["entries", "search"],
            Some(&[("q", query), ("limit", limit.as_str())]),
        )
        .await
    }

    /// List weekly reviews, most recent first.
    pub async fn list_weekly_reviews(&self, limit: u64, offset: u64) -> Result<Page<WeeklyReview>> {
        self.get(&["reviews"], Some(&[("limit", limit), ("offset", offset)]))
            .await
    }

    /// Get a weekly review by id, or the most recent one for [`LATEST_REVIEW`].
    pub async fn get_weekly_review(&self, id: &str) -> Result<WeeklyReview> {
        self.get(&["reviews", id], None::<&()>).await
    }

    /// Get the authenticated user's profile.
    pub async fn get_profile(&self) -> Result<UserProfile> {
        self.get(&["users", "me"], None::<&()>).await
    }

    /// Get the user's writing style.
    pub async fn get_writing_style(&self) -> Result<WritingStyle> {
        self.get(&["users", "me", "writing-style"], None::<&()>)
            .await
    }

    /// Finalize an entry, triggering analysis and completing it.
    pub async fn finalize_entry(&self, id: &str) -> Result<JournalEntry> {
        self.request(
            Method::POST,
            &["entries", id, "finalize"],
            None::<&()>,
            Some(&serde_json::json!({})),
        )
        .await
    }

    // ── Plumbing ─────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        segments: &[&str],
        query: Option<&Q>,
    ) -> Result<T> {
        self.request(Method::GET, segments, query, None::<&()>).await
    }

    async fn request<T, Q, B>(
        &self,
        method: Method,
        segments: &[&str],
        query: Option<&Q>,
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        debug!(%method, path = url.path(), "journal API request");

        let mut request = self.http.request(method, url);
        if let Some(query) = query {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(|e| {
            let err = McpError::from(e);
            warn!(error = %err, "journal API request failed");
            err
        })?;
        Self::handle_response(response).await
    }

    /// Append path segments to the base URL, percent-encoding each one.
    ///
    /// Dot segments are refused: the URL parser would resolve them away.
    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        for segment in segments {
            check_path_id("id", segment)?;
        }
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| McpError::Request(format!("cannot append a path to {}", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .map(str::to_string)
                        .unwrap_or_else(|| format!("HTTP {}", status.as_u16()))
                });
            warn!(status = status.as_u16(), %message, "journal API returned an error");
            return Err(McpError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        let envelope: Envelope<JsonValue> = serde_json::from_slice(&body)
            .map_err(|e| McpError::Request(format!("invalid response body: {}", e)))?;

        if envelope.status == "error" {
            let message = envelope
                .message
                .unwrap_or_else(|| "the journal API reported an error".to_string());
            warn!(status = status.as_u16(), %message, "journal API returned an error envelope");
            return Err(McpError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        match envelope.data {
            Some(data) if !data.is_null() => serde_json::from_value(data)
                .map_err(|e| McpError::Request(format!("unexpected response shape: {}", e))),
            _ => Err(McpError::Backend {
                status: status.as_u16(),
                message: envelope
                    .message
                    .unwrap_or_else(|| "response contained no data".to_string()),
            }),
        }
    }
}
