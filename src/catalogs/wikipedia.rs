//! Wikipedia catalog implementation
//!
//! Quick mode looks the text up as an article title through the REST summary
//! endpoint. Full-text mode pages through the MediaWiki search API, and
//! expanding a hit fetches the same REST summary for its title.

use super::traits::*;
use crate::config::CatalogConfig;
use crate::errors::{ExplorerError, Result};
use crate::network::accept_language;
use crate::query::{Query, SearchMode};
use crate::results::{DetailPayload, ResultItem, ResultPage};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;

static MARKUP: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Wikipedia encyclopedia catalog
pub struct Wikipedia {
    api_url: String,
    rest_url: String,
    site_url: String,
    lang: String,
    page_size: u32,
    default_mode: SearchMode,
    headers: HashMap<String, String>,
}

impl Wikipedia {
    pub fn new() -> Self {
        Self {
            api_url: "https://{lang}.wikipedia.org/w/api.php".to_string(),
            rest_url: "https://{lang}.wikipedia.org/api/rest_v1".to_string(),
            site_url: "https://{lang}.wikipedia.org".to_string(),
            lang: "en".to_string(),
            page_size: crate::DEFAULT_PAGE_SIZE,
            default_mode: SearchMode::Quick,
            headers: HashMap::new(),
        }
    }

    fn with_lang(&self, template: &str) -> String {
        template.replace("{lang}", &self.lang)
    }

    /// GET request asking for content in the configured language
    fn request(&self, url: String) -> ApiRequest {
        ApiRequest::get(url)
            .header("Accept-Language", accept_language(&self.lang))
            .headers(&self.headers)
    }

    fn summary_request(&self, title: &str) -> ApiRequest {
        self.request(format!(
            "{}/page/summary/{}",
            self.with_lang(&self.rest_url),
            urlencoding::encode(title)
        ))
    }

    /// Strip search-highlight markup and common entities from a snippet
    fn clean_snippet(snippet: &str) -> String {
        MARKUP
            .replace_all(snippet, "")
            .replace("&quot;", "\"")
            .replace("&#039;", "'")
            .replace("&lt;", "<")
            .replace("&gt;", ">")
            .replace("&amp;", "&")
    }
}

impl Default for Wikipedia {
    fn default() -> Self {
        Self::new()
    }
}

/// Base language code (e.g., "en" from "en-US"), "en" for "all" or empty
fn base_lang(lang: &str) -> String {
    if lang == "all" || lang.is_empty() {
        return "en".to_string();
    }
    lang.split('-').next().unwrap_or("en").to_lowercase()
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    query: Option<QueryBlock>,
    error: Option<ApiError>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct QueryBlock {
    searchinfo: Option<SearchInfo>,
    search: Option<Vec<Hit>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchInfo {
    totalhits: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Hit {
    title: Option<String>,
    pageid: Option<u64>,
    snippet: Option<String>,
    timestamp: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ApiError {
    code: Option<String>,
    info: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Summary {
    title: Option<String>,
    description: Option<String>,
    extract: Option<String>,
    thumbnail: Option<Image>,
    content_urls: Option<ContentUrls>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Image {
    source: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ContentUrls {
    desktop: Option<PageUrl>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PageUrl {
    page: Option<String>,
}

impl Summary {
    fn thumbnail(&self) -> Option<String> {
        self.thumbnail.as_ref().and_then(|t| t.source.clone())
    }

    fn page_url(&self) -> Option<String> {
        self.content_urls
            .as_ref()
            .and_then(|c| c.desktop.as_ref())
            .and_then(|d| d.page.clone())
    }
}

impl Catalog for Wikipedia {
    fn name(&self) -> &str {
        "wikipedia"
    }

    fn modes(&self) -> Vec<SearchMode> {
        vec![SearchMode::Quick, SearchMode::FullText]
    }

    fn default_mode(&self) -> SearchMode {
        self.default_mode
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn search_request(&self, query: &Query, page: u32) -> Result<ApiRequest> {
        match query.mode {
            SearchMode::Quick => Ok(self.summary_request(&query.text)),
            SearchMode::FullText => {
                let offset = page_offset(page, self.page_size);
                let request = self
                    .request(self.with_lang(&self.api_url))
                    .param("origin", "*")
                    .param("action", "query")
                    .param("list", "search")
                    .param("srsearch", query.text.clone())
                    .param("format", "json")
                    .param("srlimit", self.page_size.to_string())
                    .param("sroffset", offset.to_string());
                Ok(request)
            }
            other => Err(ExplorerError::Validation(format!(
                "unsupported mode: {}",
                other
            ))),
        }
    }

    fn parse_search(&self, query: &Query, page: u32, response: &ApiResponse) -> Result<ResultPage> {
        if query.mode == SearchMode::Quick {
            let summary: Summary = response.json()?;
            let title = summary.title.clone().unwrap_or_else(|| query.text.clone());

            let mut item = ResultItem::new(title.clone(), title);
            item.snippet = summary.extract.clone();
            item.metadata.thumbnail = summary.thumbnail();
            item.metadata.url = summary.page_url();

            return Ok(ResultPage {
                items: vec![item],
                start_offset: 0,
                total_available: 1,
            });
        }

        let data: SearchResponse = response.json()?;
        if let Some(error) = data.error {
            return Err(ExplorerError::Decode(format!(
                "{}: {}",
                error.code.unwrap_or_else(|| "error".to_string()),
                error.info.unwrap_or_default()
            )));
        }

        let block = data.query.unwrap_or_default();
        let total = block
            .searchinfo
            .and_then(|info| info.totalhits)
            .unwrap_or(0);
        let site = self.with_lang(&self.site_url);

        let items = block
            .search
            .unwrap_or_default()
            .into_iter()
            .map(|hit| {
                let title = hit.title.unwrap_or_default();
                let mut item = ResultItem::new(title.clone(), title);
                item.snippet = hit.snippet.as_deref().map(Self::clean_snippet);
                item.metadata.year = hit
                    .timestamp
                    .as_deref()
                    .and_then(|ts| ts.get(..4))
                    .and_then(|year| year.parse().ok());
                item.metadata.url = hit.pageid.map(|id| format!("{}/?curid={}", site, id));
                item
            })
            .collect();

        Ok(ResultPage {
            items,
            start_offset: page_offset(page, self.page_size),
            total_available: total,
        })
    }

    fn detail_request(&self, key: &str) -> Result<ApiRequest> {
        if key.trim().is_empty() {
            return Err(ExplorerError::Validation("missing item key".to_string()));
        }
        Ok(self.summary_request(key))
    }

    fn parse_detail(&self, key: &str, response: &ApiResponse) -> Result<DetailPayload> {
        let summary: Summary = response.json()?;
        let thumbnail = summary.thumbnail();
        let url = summary.page_url();

        Ok(DetailPayload {
            title: summary.title.or_else(|| Some(key.to_string())),
            tagline: summary.description,
            description: summary.extract,
            subjects: Vec::new(),
            thumbnail,
            url,
        })
    }

    fn init(&mut self, config: &CatalogConfig) -> anyhow::Result<()> {
        self.lang = base_lang(&config.lang);
        if let Some(ref url) = config.base_url {
            let base = url.trim_end_matches('/');
            self.site_url = base.to_string();
            self.api_url = format!("{}/w/api.php", base);
            self.rest_url = format!("{}/api/rest_v1", base);
        }
        if let Some(ref url) = config.detail_url {
            self.rest_url = url.trim_end_matches('/').to_string();
        }
        if let Some(mode) = config.default_mode {
            if !self.modes().contains(&mode) {
                return Err(anyhow::anyhow!("wikipedia does not support mode {}", mode));
            }
            self.default_mode = mode;
        }
        if config.page_size == 0 {
            return Err(anyhow::anyhow!("page_size must be positive"));
        }
        self.page_size = config.page_size;
        self.headers = config.headers.clone();
        Ok(())
    }
}
