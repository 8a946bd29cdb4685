//! Query store
//!
//! Holds the text typed so far and the active search mode. Nothing is
//! validated while typing; [`QueryStore::validated`] runs at submit time.

use crate::errors::{ExplorerError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the query text is sent upstream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchMode {
    /// Single summary lookup of the text, not paged
    Quick,
    /// Paged free-text search
    FullText,
    /// Paged search on titles
    Title,
    /// Paged search on author names
    Author,
}

impl SearchMode {
    /// Whether results in this mode come in pages
    pub fn is_paged(&self) -> bool {
        !matches!(self, SearchMode::Quick)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SearchMode::Quick => "quick",
            SearchMode::FullText => "full_text",
            SearchMode::Title => "title",
            SearchMode::Author => "author",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A query as submitted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    pub text: String,
    pub mode: SearchMode,
}

impl Query {
    pub fn new(text: impl Into<String>, mode: SearchMode) -> Self {
        Self {
            text: text.into(),
            mode,
        }
    }

    /// Check if query is empty
    pub fn is_empty(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Current query text and mode of one explorer
#[derive(Debug, Clone)]
pub struct QueryStore {
    query: Query,
    supported: Vec<SearchMode>,
}

impl QueryStore {
    /// Create a store limited to the given modes, starting in `mode`
    pub fn new(mode: SearchMode, supported: Vec<SearchMode>) -> Self {
        Self {
            query: Query::new(String::new(), mode),
            supported,
        }
    }

    pub fn set_query(&mut self, text: impl Into<String>) {
        self.query.text = text.into();
    }

    /// Switch mode; modes the catalog cannot serve are rejected
    pub fn set_mode(&mut self, mode: SearchMode) -> Result<()> {
        if !self.supported.contains(&mode) {
            return Err(ExplorerError::Validation(format!(
                "unsupported mode: {}",
                mode
            )));
        }
        self.query.mode = mode;
        Ok(())
    }

    pub fn query(&self) -> &Query {
        &self.query
    }

    pub fn mode(&self) -> SearchMode {
        self.query.mode
    }

    pub fn supported_modes(&self) -> &[SearchMode] {
        &self.supported
    }

    /// The current query, if it may be submitted
    pub fn validated(&self) -> Result<Query> {
        if self.query.is_empty() {
            return Err(ExplorerError::empty_query());
        }
        Ok(self.query.clone())
    }
}
