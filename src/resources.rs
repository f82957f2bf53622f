//! Read-only context documents.
//!
//! Resources: `journal://profile`, `journal://entries/recent`

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::JournalClient;
use crate::error::{McpError, Result};
use crate::model::ListEntriesQuery;
use crate::render;

/// Number of entries summarized by the recent-entries resource.
pub const RECENT_ENTRIES: u64 = 5;

/// A resource definition for the MCP resources/list response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceDef {
    /// Resource URI (e.g., "journal://profile")
    pub uri: String,
    /// Human-readable name
    pub name: String,
    /// What the resource contains
    pub description: String,
    /// Content type of the rendered text
    #[serde(rename = "mimeType")]
    pub mime_type: String,
}

/// Every resource the server exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    /// `journal://profile`
    Profile,
    /// `journal://entries/recent`
    RecentEntries,
}

impl ResourceKind {
    /// All resources, in catalog order.
    pub const ALL: [ResourceKind; 2] = [ResourceKind::Profile, ResourceKind::RecentEntries];

    /// URI the resource is read by.
    pub fn uri(&self) -> &'static str {
        match self {
            ResourceKind::Profile => "journal://profile",
            ResourceKind::RecentEntries => "journal://entries/recent",
        }
    }

    fn def(&self) -> ResourceDef {
        let (name, description) = match self {
            ResourceKind::Profile => (
                "User profile",
                "The journaling user's profile: timezone, how long they have been journaling, \
                 total entries, current streak, and preferred writing style.",
            ),
            ResourceKind::RecentEntries => (
                "Recent entries",
                "Summary of the 5 most recent journal entries.",
            ),
        };
        ResourceDef {
            uri: self.uri().to_string(),
            name: name.to_string(),
            description: description.to_string(),
            mime_type: "text/plain".to_string(),
        }
    }
}

/// Registry of available MCP resources.
pub struct ResourceRegistry {
    resources: Vec<ResourceDef>,
    by_uri: HashMap<&'static str, ResourceKind>,
}

impl ResourceRegistry {
    /// Create the registry with every journal resource.
    pub fn new() -> Self {
        Self {
            resources: ResourceKind::ALL.iter().map(ResourceKind::def).collect(),
            by_uri: ResourceKind::ALL.iter().map(|kind| (kind.uri(), *kind)).collect(),
        }
    }

    /// Get all resource definitions.
    pub fn resources(&self) -> &[ResourceDef] {
        &self.resources
    }

    /// Resolve a resource URI.
    pub fn resolve(&self, uri: &str) -> Result<ResourceKind> {
        self.by_uri
            .get(uri)
            .copied()
            .ok_or_else(|| McpError::ResourceNotFound(uri.to_string()))
    }

    /// Read a resource, returning its rendered text.
    pub async fn read(&self, client: &JournalClient, uri: &str) -> Result<String> {
        let kind = self.resolve(uri)?;
        debug!(uri, "reading resource");

        match kind {
            ResourceKind::Profile => {
                let profile = client.get_profile().await?;
                Ok(render::profile(&profile))
            }
            ResourceKind::RecentEntries => {
                let query = ListEntriesQuery {
                    limit: Some(RECENT_ENTRIES),
                    ..Default::default()
                };
                let page = client.list_entries(&query).await?;
                Ok(render::recent_entries(&page))
            }
        }
    }
}

impl Default for ResourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}
