//! Result container accumulating pages of search results

use super::types::*;
use std::sync::{Arc, RwLock};

/// Accumulated results and pagination counters for one explorer
#[derive(Debug, Clone, Default)]
pub struct ResultContainer {
    state: Arc<RwLock<PageState>>,
}

#[derive(Debug, Default)]
struct PageState {
    items: Vec<ResultItem>,
    /// Last page successfully applied, 0 before any search
    page: u32,
    start_offset: u64,
    total_available: u64,
    has_more: bool,
    /// Bumped by every replacing search; appends only extend their own generation
    generation: u64,
    /// A replacing search for `generation` has not settled yet
    replace_pending: bool,
}

/// Handle for one issued search, checked when its response arrives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchTicket {
    generation: u64,
    append: bool,
}

impl ResultContainer {
    /// Create a new empty result container
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new search.
    ///
    /// A replacing search starts a new generation and invalidates every
    /// search issued before it. An append belongs to the current generation.
    pub fn begin(&self, append: bool) -> SearchTicket {
        let mut state = self.state.write().unwrap();
        if !append {
            state.generation += 1;
            state.replace_pending = true;
        }
        SearchTicket {
            generation: state.generation,
            append,
        }
    }

    /// Whether a replacing search is still waiting for its response
    pub fn replace_pending(&self) -> bool {
        self.state.read().unwrap().replace_pending
    }

    /// Whether no replacing search was issued after `ticket`
    pub fn is_current(&self, ticket: SearchTicket) -> bool {
        self.state.read().unwrap().generation == ticket.generation
    }

    /// Settle a search that failed. Results are left as they were.
    pub fn abandon(&self, ticket: SearchTicket) {
        let mut state = self.state.write().unwrap();
        if !ticket.append && state.generation == ticket.generation {
            state.replace_pending = false;
        }
    }

    /// Apply a fetched page. Returns false, leaving everything untouched,
    /// when the page is stale: a newer replacing search was issued, an
    /// append arrived before its generation's first page, or the page was
    /// already applied.
    pub fn apply(&self, ticket: SearchTicket, page: u32, fetched: ResultPage) -> bool {
        let mut state = self.state.write().unwrap();
        if state.generation != ticket.generation {
            return false;
        }
        if ticket.append && (state.replace_pending || page <= state.page) {
            return false;
        }

        state.has_more = fetched.has_more();
        state.start_offset = fetched.start_offset;
        state.total_available = fetched.total_available;
        state.page = page;

        if ticket.append {
            state.items.extend(fetched.items);
        } else {
            state.items = fetched.items;
            state.replace_pending = false;
        }
        true
    }

    /// Get all accumulated results in order
    pub fn items(&self) -> Vec<ResultItem> {
        self.state.read().unwrap().items.clone()
    }

    /// Find a result by key
    pub fn get(&self, key: &str) -> Option<ResultItem> {
        self.state
            .read()
            .unwrap()
            .items
            .iter()
            .find(|item| item.key == key)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Last page applied, 0 before the first successful search
    pub fn page(&self) -> u32 {
        self.state.read().unwrap().page
    }

    pub fn has_more(&self) -> bool {
        self.state.read().unwrap().has_more
    }

    pub fn start_offset(&self) -> u64 {
        self.state.read().unwrap().start_offset
    }

    pub fn total_available(&self) -> u64 {
        self.state.read().unwrap().total_available
    }
}
