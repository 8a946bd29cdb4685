//! Search-and-detail controller

use super::models::{ExplorerSnapshot, PageInfo};
use crate::cache::DetailCache;
use crate::catalogs::{ApiRequest, Catalog};
use crate::errors::{ExplorerError, Result};
use crate::network::HttpClient;
use crate::query::{Query, QueryStore, SearchMode};
use crate::recorder::{EndpointRecorder, LastEndpoint};
use crate::results::{DetailPayload, ResultContainer, ResultItem, ResultPage};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Progressive-disclosure explorer over one catalog.
///
/// Runs paged searches, accumulates pages on `load_more`, fetches each
/// result's detail once on first expand and records the last request.
/// Clones share state, so operations may overlap; two explorers never do.
#[derive(Clone)]
pub struct Explorer {
    catalog: Arc<dyn Catalog>,
    client: HttpClient,
    query: Arc<RwLock<QueryStore>>,
    results: ResultContainer,
    details: DetailCache,
    recorder: EndpointRecorder,
    in_flight: Arc<AtomicUsize>,
    error: Arc<RwLock<Option<String>>>,
}

/// Counts a request as in flight until dropped
struct InFlight(Arc<AtomicUsize>);

impl InFlight {
    fn enter(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(counter.clone())
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

impl Explorer {
    /// Create an explorer starting in the catalog's default mode
    pub fn new(catalog: Arc<dyn Catalog>, client: HttpClient) -> Self {
        let query = QueryStore::new(catalog.default_mode(), catalog.modes());
        Self {
            catalog,
            client,
            query: Arc::new(RwLock::new(query)),
            results: ResultContainer::new(),
            details: DetailCache::new(),
            recorder: EndpointRecorder::default(),
            in_flight: Arc::new(AtomicUsize::new(0)),
            error: Arc::new(RwLock::new(None)),
        }
    }

    /// Set how long the "copied" acknowledgement stays raised
    pub fn with_copied_ack(mut self, ack: Duration) -> Self {
        self.recorder = EndpointRecorder::new(ack);
        self
    }

    /// Name of the underlying catalog
    pub fn catalog_name(&self) -> &str {
        self.catalog.name()
    }

    pub fn page_size(&self) -> u32 {
        self.catalog.page_size()
    }

    pub fn set_query(&self, text: impl Into<String>) {
        self.query.write().unwrap().set_query(text);
    }

    pub fn set_mode(&self, mode: SearchMode) -> Result<()> {
        self.query.write().unwrap().set_mode(mode)
    }

    pub fn query(&self) -> Query {
        self.query.read().unwrap().query().clone()
    }

    pub fn supported_modes(&self) -> Vec<SearchMode> {
        self.query.read().unwrap().supported_modes().to_vec()
    }

    /// Store `text` and `mode`, then fetch the first page, replacing results
    pub async fn submit_query(&self, text: impl Into<String>, mode: SearchMode) -> Result<PageInfo> {
        self.set_query(text);
        if let Err(e) = self.set_mode(mode) {
            return Err(self.report(e.to_string(), e));
        }
        self.search(1, false).await
    }

    /// Fetch `page` of the current query; append to or replace the results.
    ///
    /// On failure results and counters are left as they were. A response
    /// made stale by a newer replacing search, or an appended page that no
    /// longer extends the current results, is discarded and reported with
    /// `stale` set.
    pub async fn search(&self, page: u32, append: bool) -> Result<PageInfo> {
        let page = page.max(1);

        let query = self.query.read().unwrap().validated();
        let query = match query {
            Ok(q) => q,
            Err(e) => return Err(self.report(e.to_string(), e)),
        };

        let request = self
            .catalog
            .search_request(&query, page)
            .and_then(|r| LastEndpoint::from_request(&r).map(|endpoint| (r, endpoint)));
        let (request, endpoint) = match request {
            Ok(pair) => pair,
            Err(e) => return Err(self.report(format!("Search failed. {}", e), e)),
        };

        let ticket = self.results.begin(append);
        self.clear_error();
        info!(
            "Searching {} for '{}' ({} mode, page {})",
            self.catalog.name(),
            query.text,
            query.mode,
            page
        );
        self.recorder.record(endpoint);

        let outcome = {
            let _guard = InFlight::enter(&self.in_flight);
            self.fetch_page(&query, page, request).await
        };

        match outcome {
            Ok(fetched) => {
                let mut info = PageInfo::new(page, &fetched);
                if self.results.apply(ticket, page, fetched) {
                    debug!(
                        "{} page {} returned {} items ({} available)",
                        self.catalog.name(),
                        page,
                        info.item_count,
                        info.total_available
                    );
                } else {
                    debug!(
                        "Discarding stale {} page {} for '{}'",
                        self.catalog.name(),
                        page,
                        query.text
                    );
                    info.stale = true;
                }
                Ok(info)
            }
            Err(e) => {
                warn!("Search failed for {}: {}", self.catalog.name(), e);
                self.results.abandon(ticket);
                if self.results.is_current(ticket) {
                    self.set_error(format!("Search failed. {}", e));
                }
                Err(e)
            }
        }
    }

    /// Fetch the next page and append it. Does nothing, and returns `None`,
    /// when no further page is available or a new query's first page is
    /// still on its way.
    pub async fn load_more(&self) -> Result<Option<PageInfo>> {
        if self.results.replace_pending() {
            debug!("{} first page still loading, not loading more", self.catalog.name());
            return Ok(None);
        }
        if !self.results.has_more() {
            debug!("No more {} results to load", self.catalog.name());
            return Ok(None);
        }
        let next = self.results.page() + 1;
        self.search(next, true).await.map(Some)
    }

    /// Flip the expansion state of `key` and return the new state.
    ///
    /// Expanding a key with nothing cached fetches its detail. Once a fetch
    /// succeeded the key never hits the network again; a failed fetch leaves
    /// the item expanded and uncached, so collapsing and expanding retries.
    pub async fn toggle_expand(&self, key: &str) -> Result<bool> {
        if key.is_empty() {
            let e = ExplorerError::Validation("missing item key".to_string());
            return Err(self.report(e.to_string(), e));
        }

        if !self.details.toggle(key) {
            return Ok(false);
        }
        if self.details.contains(key) {
            return Ok(true);
        }

        let request = self
            .catalog
            .detail_request(key)
            .and_then(|r| LastEndpoint::from_request(&r).map(|endpoint| (r, endpoint)));
        let (request, endpoint) = match request {
            Ok(pair) => pair,
            Err(e) => return Err(self.report(format!("Failed to fetch details. {}", e), e)),
        };

        let fetched = self
            .details
            .get_or_fetch(key, self.fetch_detail(key, request, endpoint))
            .await;

        match fetched {
            Ok(_) => Ok(true),
            Err(e) => {
                warn!("Detail fetch failed for {} {}: {}", self.catalog.name(), key, e);
                Err(self.report(format!("Failed to fetch details. {}", e), e))
            }
        }
    }

    async fn fetch_page(&self, query: &Query, page: u32, request: ApiRequest) -> Result<ResultPage> {
        let response = self.client.execute(request).await?.error_for_status()?;
        self.catalog.parse_search(query, page, &response)
    }

    /// Runs only when the cache has nothing for `key` and no fetch in flight
    async fn fetch_detail(
        &self,
        key: &str,
        request: ApiRequest,
        endpoint: LastEndpoint,
    ) -> Result<DetailPayload> {
        debug!("Fetching {} detail for {}", self.catalog.name(), key);
        self.recorder.record(endpoint);
        let _guard = InFlight::enter(&self.in_flight);

        let response = self.client.execute(request).await?.error_for_status()?;
        self.catalog.parse_detail(key, &response)
    }

    /// Accumulated results in upstream order
    pub fn items(&self) -> Vec<ResultItem> {
        self.results.items()
    }

    pub fn has_more(&self) -> bool {
        self.results.has_more()
    }

    /// Last page fetched, 0 before the first successful search
    pub fn page(&self) -> u32 {
        self.results.page()
    }

    pub fn total_available(&self) -> u64 {
        self.results.total_available()
    }

    pub fn is_loading(&self) -> bool {
        self.in_flight.load(Ordering::SeqCst) > 0
    }

    /// Most recent user-visible error message
    pub fn error(&self) -> Option<String> {
        self.error.read().unwrap().clone()
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.details.is_expanded(key)
    }

    /// Cached detail for `key`, if its fetch has completed
    pub async fn detail(&self, key: &str) -> Option<DetailPayload> {
        self.details.get(key).await
    }

    pub fn last_endpoint(&self) -> Option<LastEndpoint> {
        self.recorder.last()
    }

    /// URL of the last request, for the clipboard
    pub fn copy_endpoint(&self) -> Option<String> {
        self.recorder.copy()
    }

    pub fn endpoint_copied(&self) -> bool {
        self.recorder.is_copied()
    }

    pub fn snapshot(&self) -> ExplorerSnapshot {
        ExplorerSnapshot {
            catalog: self.catalog.name().to_string(),
            query: self.query(),
            items: self.items(),
            page: self.page(),
            has_more: self.has_more(),
            loading: self.is_loading(),
            error: self.error(),
            last_endpoint: self.last_endpoint().map(|e| e.url),
            endpoint_copied: self.endpoint_copied(),
        }
    }

    fn set_error(&self, message: String) {
        *self.error.write().unwrap() = Some(message);
    }

    fn clear_error(&self) {
        *self.error.write().unwrap() = None;
    }

    fn report(&self, message: String, err: ExplorerError) -> ExplorerError {
        self.set_error(message);
        err
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::{OpenLibrary, Wikipedia};

    fn explorer() -> Explorer {
        Explorer::new(Arc::new(OpenLibrary::new()), HttpClient::new().unwrap())
    }

    #[tokio::test]
    async fn test_explorer_creation() {
        let explorer = explorer();
        assert_eq!(explorer.catalog_name(), "openlibrary");
        assert_eq!(explorer.query().mode, SearchMode::Title);
        assert_eq!(explorer.page(), 0);
        assert!(explorer.items().is_empty());
        assert!(!explorer.has_more());
        assert!(!explorer.is_loading());
        assert!(explorer.last_endpoint().is_none());
    }

    #[tokio::test]
    async fn test_empty_query_never_hits_network() {
        let explorer = explorer();
        let err = explorer.submit_query("  ", SearchMode::Title).await.unwrap_err();

        assert_eq!(err, ExplorerError::empty_query());
        assert!(explorer.last_endpoint().is_none());
        assert!(explorer.error().is_some());
        assert!(!explorer.is_loading());
    }

    #[tokio::test]
    async fn test_unsupported_mode_rejected() {
        let explorer = explorer();
        let err = explorer
            .submit_query("dune", SearchMode::FullText)
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert!(explorer.last_endpoint().is_none());
        assert_eq!(explorer.query().mode, SearchMode::Title);
    }

    #[tokio::test]
    async fn test_load_more_without_results_is_noop() {
        let explorer = explorer();
        explorer.set_query("dune");
        assert_eq!(explorer.load_more().await.unwrap(), None);
        assert!(explorer.last_endpoint().is_none());
    }

    #[tokio::test]
    async fn test_empty_key_rejected() {
        let explorer = explorer();
        assert!(explorer.toggle_expand("").await.unwrap_err().is_validation());
        assert!(!explorer.is_expanded(""));
    }

    #[tokio::test]
    async fn test_unbuildable_detail_request() {
        let explorer = explorer();
        let err = explorer.toggle_expand("OL1M").await.unwrap_err();
        assert!(err.is_validation());
        assert!(explorer
            .error()
            .unwrap()
            .starts_with("Failed to fetch details."));

        // Stays expanded; collapsing never touches the network
        assert!(explorer.is_expanded("OL1M"));
        assert!(!explorer.toggle_expand("OL1M").await.unwrap());
        assert!(explorer.last_endpoint().is_none());
    }

    #[test]
    fn test_wikipedia_starts_quick() {
        let explorer = Explorer::new(Arc::new(Wikipedia::new()), HttpClient::new().unwrap());
        assert_eq!(explorer.query().mode, SearchMode::Quick);
        assert_eq!(
            explorer.supported_modes(),
            vec![SearchMode::Quick, SearchMode::FullText]
        );
    }
}
