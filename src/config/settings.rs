//! Settings structures for explorer configuration

use crate::query::SearchMode;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

/// Main settings structure matching settings.yml
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub outgoing: OutgoingSettings,
    pub recorder: RecorderSettings,
    pub catalogs: Vec<CatalogConfig>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            outgoing: OutgoingSettings::default(),
            recorder: RecorderSettings::default(),
            catalogs: default_catalogs(),
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parse settings from YAML text
    pub fn from_yaml(content: &str) -> Result<Self> {
        let settings: Settings = serde_yaml::from_str(content)?;
        Ok(settings)
    }

    /// Merge with environment variables (EXPLORER_* prefix)
    pub fn merge_env(&mut self) {
        if let Ok(val) = std::env::var("EXPLORER_REQUEST_TIMEOUT") {
            if let Ok(seconds) = val.parse::<f64>() {
                self.outgoing.request_timeout = Some(seconds);
            }
        }
        if let Ok(val) = std::env::var("EXPLORER_PROXY") {
            self.outgoing.proxies.all = Some(val);
        }
    }

    /// Get catalog config by name
    pub fn get_catalog(&self, name: &str) -> Option<&CatalogConfig> {
        self.catalogs.iter().find(|c| c.name == name)
    }

    /// Get all enabled catalogs
    pub fn enabled_catalogs(&self) -> Vec<&CatalogConfig> {
        self.catalogs.iter().filter(|c| !c.disabled).collect()
    }
}

/// Outgoing request settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutgoingSettings {
    /// Request timeout in seconds (none = transport default)
    pub request_timeout: Option<f64>,
    /// Pool max size
    pub pool_maxsize: usize,
    /// Verify SSL certificates
    pub verify_ssl: bool,
    /// Appended to the default user agent
    pub useragent_suffix: Option<String>,
    /// Proxy settings
    pub proxies: ProxySettings,
    /// Extra headers to send on every request
    pub extra_headers: HashMap<String, String>,
}

impl Default for OutgoingSettings {
    fn default() -> Self {
        Self {
            request_timeout: None,
            pool_maxsize: 20,
            verify_ssl: true,
            useragent_suffix: None,
            proxies: ProxySettings::default(),
            extra_headers: HashMap::new(),
        }
    }
}

/// Proxy settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProxySettings {
    pub http: Option<String>,
    pub https: Option<String>,
    pub all: Option<String>,
}

/// Endpoint recorder settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecorderSettings {
    /// How long the "copied" acknowledgement stays raised, in milliseconds
    pub copied_ack_ms: u64,
}

impl RecorderSettings {
    pub fn copied_ack(&self) -> Duration {
        Duration::from_millis(self.copied_ack_ms)
    }
}

impl Default for RecorderSettings {
    fn default() -> Self {
        Self {
            copied_ack_ms: crate::DEFAULT_COPIED_ACK_MS,
        }
    }
}

/// Individual catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Catalog name (unique identifier)
    pub name: String,
    /// Catalog implementation to use
    pub catalog: String,
    /// Whether catalog is disabled
    pub disabled: bool,
    /// Results requested per page
    pub page_size: u32,
    /// Language code, for catalogs with per-language hosts
    pub lang: String,
    /// Site root, e.g. `https://openlibrary.org`. Search, detail and link
    /// URLs are all built under it.
    pub base_url: Option<String>,
    /// Override for the detail endpoint base (the work host for
    /// OpenLibrary, the REST API root for Wikipedia)
    pub detail_url: Option<String>,
    /// Mode a fresh explorer starts in
    pub default_mode: Option<SearchMode>,
    /// Headers passed through to upstream, e.g. credentials
    pub headers: HashMap<String, String>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            catalog: String::new(),
            disabled: false,
            page_size: crate::DEFAULT_PAGE_SIZE,
            lang: "en".to_string(),
            base_url: None,
            detail_url: None,
            default_mode: None,
            headers: HashMap::new(),
        }
    }
}

/// Default catalog configurations
fn default_catalogs() -> Vec<CatalogConfig> {
    vec![
        CatalogConfig {
            name: "openlibrary".to_string(),
            catalog: "openlibrary".to_string(),
            ..Default::default()
        },
        CatalogConfig {
            name: "wikipedia".to_string(),
            catalog: "wikipedia".to_string(),
            ..Default::default()
        },
    ]
}
