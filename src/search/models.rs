//! Explorer-facing data models

use crate::query::Query;
use crate::results::{ResultItem, ResultPage};
use serde::{Deserialize, Serialize};

/// Outcome of one page fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// Page number that was fetched
    pub page: u32,
    /// Items on that page
    pub item_count: usize,
    pub start_offset: u64,
    pub total_available: u64,
    /// Whether another page may exist after this one
    pub has_more: bool,
    /// A newer search was issued meanwhile and this page was discarded
    pub stale: bool,
}

impl PageInfo {
    pub fn new(page: u32, fetched: &ResultPage) -> Self {
        Self {
            page,
            item_count: fetched.items.len(),
            start_offset: fetched.start_offset,
            total_available: fetched.total_available,
            has_more: fetched.has_more(),
            stale: false,
        }
    }
}

/// Everything a presentation layer needs to render one explorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplorerSnapshot {
    pub catalog: String,
    pub query: Query,
    pub items: Vec<ResultItem>,
    pub page: u32,
    pub has_more: bool,
    pub loading: bool,
    pub error: Option<String>,
    /// URL of the last request issued
    pub last_endpoint: Option<String>,
    pub endpoint_copied: bool,
}
