//! Catalog Explorer: progressive-disclosure search over public catalog APIs
//!
//! Each [`Explorer`] runs text queries against one catalog's paged search
//! endpoint, accumulates pages on demand, lazily fetches and memoizes a
//! per-result detail resource, and remembers the last request it issued.

pub mod cache;
pub mod catalogs;
pub mod config;
pub mod errors;
pub mod network;
pub mod query;
pub mod recorder;
pub mod results;
pub mod search;

pub use catalogs::{Catalog, CatalogLoader, CatalogRegistry};
pub use config::Settings;
pub use errors::{ExplorerError, Result};
pub use network::HttpClient;
pub use query::{Query, SearchMode};
pub use recorder::LastEndpoint;
pub use results::{DetailPayload, ResultItem, ResultPage};
pub use search::{Explorer, ExplorerSnapshot, PageInfo};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default number of results requested per page
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Default lifetime of the "copied" acknowledgement in milliseconds
pub const DEFAULT_COPIED_ACK_MS: u64 = 2000;
