//! Result type definitions

use serde::{Deserialize, Serialize};

/// A single search result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultItem {
    /// Identifier used to fetch the detail resource
    pub key: String,
    /// The title of the result
    pub title: String,
    /// Content snippet/description
    pub snippet: Option<String>,
    /// Additional metadata
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl ResultItem {
    /// Create a new result
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            title: title.into(),
            snippet: None,
            metadata: ItemMetadata::default(),
        }
    }

    /// Whether this result can be expanded
    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }
}

/// Additional result metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemMetadata {
    /// Thumbnail URL
    pub thumbnail: Option<String>,
    /// Author names, in upstream order
    #[serde(default)]
    pub authors: Vec<String>,
    /// Publication or revision year
    pub year: Option<i32>,
    /// Canonical page for the result
    pub url: Option<String>,
}

/// One page of search results as decoded from upstream
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub items: Vec<ResultItem>,
    /// Offset of the first item within the whole result set
    pub start_offset: u64,
    /// Number of results upstream reports for the query
    pub total_available: u64,
}

impl ResultPage {
    /// Whether another page may exist after this one
    pub fn has_more(&self) -> bool {
        self.start_offset.saturating_add(self.items.len() as u64) < self.total_available
    }
}

/// Secondary resource fetched when a result is expanded
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DetailPayload {
    pub title: Option<String>,
    /// Short one-line description
    pub tagline: Option<String>,
    /// Free-text description
    pub description: Option<String>,
    #[serde(default)]
    pub subjects: Vec<String>,
    pub thumbnail: Option<String>,
    pub url: Option<String>,
}

impl DetailPayload {
    /// The first `n` subjects
    pub fn top_subjects(&self, n: usize) -> &[String] {
        &self.subjects[..self.subjects.len().min(n)]
    }
}
