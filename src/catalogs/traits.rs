//! Catalog traits and types

use crate::config::CatalogConfig;
use crate::errors::{ExplorerError, Result};
use crate::query::{Query, SearchMode};
use crate::results::{DetailPayload, ResultPage};
use std::collections::HashMap;
use url::Url;

/// HTTP request to be made for a catalog
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// URL to request, without query string
    pub url: String,
    /// HTTP method
    pub method: HttpMethod,
    /// Request headers
    pub headers: HashMap<String, String>,
    /// Query parameters, in the order they are sent
    pub params: Vec<(String, String)>,
}

impl ApiRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            method: HttpMethod::Get,
            headers: HashMap::new(),
            params: Vec::new(),
        }
    }

    /// Add a header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add several headers
    pub fn headers(mut self, headers: &HashMap<String, String>) -> Self {
        for (key, value) in headers {
            self.headers.insert(key.clone(), value.clone());
        }
        self
    }

    /// Add a query parameter
    pub fn param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// The URL with its query string, form-encoded
    pub fn full_url(&self) -> Result<String> {
        let mut url = Url::parse(&self.url)?;
        if !self.params.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in &self.params {
                pairs.append_pair(key, value);
            }
        }
        Ok(url.to_string())
    }

    /// Header names, sorted. Values are left out so credentials never leak
    pub fn header_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.headers.keys().cloned().collect();
        names.sort();
        names
    }
}

/// HTTP method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
        }
    }
}

/// HTTP response from a catalog request
#[derive(Debug)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: u16,
    /// Response body as text
    pub text: String,
}

impl ApiResponse {
    /// Parse response as JSON
    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T> {
        Ok(serde_json::from_str(&self.text)?)
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx response into an error
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(ExplorerError::Status(self.status))
        }
    }
}

/// A search domain: how to build and decode its search and detail calls.
///
/// Implementations are pure request builders and response parsers; the
/// explorer owns all state and performs the I/O.
pub trait Catalog: Send + Sync {
    /// Catalog name
    fn name(&self) -> &str;

    /// Modes this catalog can serve
    fn modes(&self) -> Vec<SearchMode>;

    /// Mode a fresh explorer starts in
    fn default_mode(&self) -> SearchMode;

    /// Number of results per page
    fn page_size(&self) -> u32 {
        crate::DEFAULT_PAGE_SIZE
    }

    /// Build the search request for `page` (1-indexed)
    fn search_request(&self, query: &Query, page: u32) -> Result<ApiRequest>;

    /// Parse a successful search response into one page of results
    fn parse_search(&self, query: &Query, page: u32, response: &ApiResponse)
        -> Result<ResultPage>;

    /// Build the detail request for a result key
    fn detail_request(&self, key: &str) -> Result<ApiRequest>;

    /// Parse a successful detail response
    fn parse_detail(&self, key: &str, response: &ApiResponse) -> Result<DetailPayload>;

    /// Optional initialization from configuration
    fn init(&mut self, _config: &CatalogConfig) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Offset of the first item on `page` (1-indexed)
pub fn page_offset(page: u32, page_size: u32) -> u64 {
    u64::from(page.max(1) - 1) * u64::from(page_size)
}
