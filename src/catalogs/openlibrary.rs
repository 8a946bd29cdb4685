//! OpenLibrary catalog implementation
//!
//! Book search by title or author, with work records as the detail resource.

use super::traits::*;
use crate::config::CatalogConfig;
use crate::errors::{ExplorerError, Result};
use crate::query::{Query, SearchMode};
use crate::results::{DetailPayload, ResultItem, ResultPage};
use serde::Deserialize;
use std::collections::HashMap;

/// OpenLibrary book catalog
pub struct OpenLibrary {
    base_url: String,
    detail_url: String,
    covers_url: String,
    page_size: u32,
    default_mode: SearchMode,
    headers: HashMap<String, String>,
}

impl OpenLibrary {
    pub fn new() -> Self {
        Self {
            base_url: "https://openlibrary.org".to_string(),
            detail_url: "https://openlibrary.org".to_string(),
            covers_url: "https://covers.openlibrary.org".to_string(),
            page_size: crate::DEFAULT_PAGE_SIZE,
            default_mode: SearchMode::Title,
            headers: HashMap::new(),
        }
    }

    /// Cover image URL for a cover id; size is S, M or L
    fn cover_url(&self, cover_id: i64, size: char) -> Option<String> {
        (cover_id > 0).then(|| format!("{}/b/id/{}-{}.jpg", self.covers_url, cover_id, size))
    }
}

impl Default for OpenLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse {
    #[serde(rename = "numFound")]
    num_found: Option<u64>,
    start: Option<u64>,
    docs: Option<Vec<Doc>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Doc {
    key: Option<String>,
    title: Option<String>,
    cover_i: Option<i64>,
    author_name: Option<Vec<String>>,
    first_publish_year: Option<i32>,
    cover_edition_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct Work {
    title: Option<String>,
    description: Option<TextValue>,
    subjects: Option<Vec<String>>,
    covers: Option<Vec<i64>>,
}

/// Descriptions come either as plain strings or as `{type, value}` objects.
/// Any other shape reads as no description.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TextValue {
    Plain(String),
    Typed { value: Option<String> },
    Other(serde_json::Value),
}

impl TextValue {
    fn into_string(self) -> Option<String> {
        match self {
            TextValue::Plain(s) => Some(s),
            TextValue::Typed { value } => value,
            TextValue::Other(_) => None,
        }
    }
}

impl Catalog for OpenLibrary {
    fn name(&self) -> &str {
        "openlibrary"
    }

    fn modes(&self) -> Vec<SearchMode> {
        vec![SearchMode::Title, SearchMode::Author]
    }

    fn default_mode(&self) -> SearchMode {
        self.default_mode
    }

    fn page_size(&self) -> u32 {
        self.page_size
    }

    fn search_request(&self, query: &Query, page: u32) -> Result<ApiRequest> {
        let field = match query.mode {
            SearchMode::Title => "title",
            SearchMode::Author => "author",
            other => {
                return Err(ExplorerError::Validation(format!(
                    "unsupported mode: {}",
                    other
                )))
            }
        };

        let request = ApiRequest::get(format!("{}/search.json", self.base_url))
            .headers(&self.headers)
            .param(field, query.text.clone())
            .param("page", page.max(1).to_string())
            .param("limit", self.page_size.to_string());

        Ok(request)
    }

    fn parse_search(
        &self,
        _query: &Query,
        page: u32,
        response: &ApiResponse,
    ) -> Result<ResultPage> {
        let data: SearchResponse = response.json()?;

        let items = data
            .docs
            .unwrap_or_default()
            .into_iter()
            .map(|doc| {
                let key = doc
                    .key
                    .or(doc.cover_edition_key)
                    .unwrap_or_default();

                let mut item = ResultItem::new(key, doc.title.unwrap_or_default());
                item.metadata.thumbnail = doc.cover_i.and_then(|id| self.cover_url(id, 'M'));
                item.metadata.authors = doc.author_name.unwrap_or_default();
                item.metadata.year = doc.first_publish_year;
                if item.key.starts_with('/') {
                    item.metadata.url = Some(format!("{}{}", self.base_url, item.key));
                }
                item
            })
            .collect();

        Ok(ResultPage {
            items,
            start_offset: data
                .start
                .unwrap_or_else(|| page_offset(page, self.page_size)),
            total_available: data.num_found.unwrap_or(0),
        })
    }

    fn detail_request(&self, key: &str) -> Result<ApiRequest> {
        if !key.starts_with('/') {
            return Err(ExplorerError::Validation(format!(
                "not a work key: {}",
                key
            )));
        }

        Ok(ApiRequest::get(format!("{}{}.json", self.detail_url, key)).headers(&self.headers))
    }

    fn parse_detail(&self, key: &str, response: &ApiResponse) -> Result<DetailPayload> {
        let work: Work = response.json()?;

        Ok(DetailPayload {
            title: work.title,
            tagline: None,
            description: work.description.and_then(TextValue::into_string),
            subjects: work.subjects.unwrap_or_default(),
            thumbnail: work
                .covers
                .unwrap_or_default()
                .into_iter()
                .find_map(|id| self.cover_url(id, 'L')),
            url: Some(format!("{}{}", self.base_url, key)),
        })
    }

    fn init(&mut self, config: &CatalogConfig) -> anyhow::Result<()> {
        if let Some(ref url) = config.base_url {
            self.base_url = url.trim_end_matches('/').to_string();
            self.detail_url = self.base_url.clone();
        }
        if let Some(ref url) = config.detail_url {
            self.detail_url = url.trim_end_matches('/').to_string();
        }
        if let Some(mode) = config.default_mode {
            if !self.modes().contains(&mode) {
                return Err(anyhow::anyhow!("openlibrary does not support mode {}", mode));
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

#[cfg(test)]
mod tests {
    use super::*;

    fn response(text: &str) -> ApiResponse {
        ApiResponse {
            status: 200,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_search_request() {
        let ol = OpenLibrary::new();
        let query = Query::new("harry potter", SearchMode::Title);
        let request = ol.search_request(&query, 2).unwrap();

        assert_eq!(
            request.full_url().unwrap(),
            "https://openlibrary.org/search.json?title=harry+potter&page=2&limit=10"
        );
    }

    #[test]
    fn test_author_mode_param() {
        let ol = OpenLibrary::new();
        let query = Query::new("tolkien", SearchMode::Author);
        let request = ol.search_request(&query, 1).unwrap();
        assert_eq!(request.params[0], ("author".to_string(), "tolkien".to_string()));

        let quick = Query::new("tolkien", SearchMode::Quick);
        assert!(ol.search_request(&quick, 1).unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_search() {
        let ol = OpenLibrary::new();
        let query = Query::new("dune", SearchMode::Title);
        let body = r#"{
            "numFound": 2, "num_found": 2, "start": 0,
            "docs": [
                {"key": "/works/OL893415W", "title": "Dune", "cover_i": 11481354,
                 "author_name": ["Frank Herbert"], "first_publish_year": 1965},
                {"title": "Dune Messiah", "cover_edition_key": "OL1M"}
            ]
        }"#;

        let page = ol.parse_search(&query, 1, &response(body)).unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.total_available, 2);
        assert!(!page.has_more());

        let dune = &page.items[0];
        assert_eq!(dune.key, "/works/OL893415W");
        assert_eq!(
            dune.metadata.thumbnail.as_deref(),
            Some("https://covers.openlibrary.org/b/id/11481354-M.jpg")
        );
        assert_eq!(dune.metadata.authors, vec!["Frank Herbert"]);
        assert_eq!(dune.metadata.year, Some(1965));
        assert_eq!(
            dune.metadata.url.as_deref(),
            Some("https://openlibrary.org/works/OL893415W")
        );

        let messiah = &page.items[1];
        assert_eq!(messiah.key, "OL1M");
        assert!(messiah.metadata.thumbnail.is_none());
        assert!(messiah.metadata.authors.is_empty());
        assert!(messiah.metadata.url.is_none());
    }

    #[test]
    fn test_parse_search_missing_fields() {
        let ol = OpenLibrary::new();
        let query = Query::new("x", SearchMode::Title);

        let page = ol.parse_search(&query, 3, &response("{}")).unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.start_offset, 20);
        assert_eq!(page.total_available, 0);

        let page = ol
            .parse_search(&query, 1, &response(r#"{"docs": null, "numFound": 5}"#))
            .unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_available, 5);
    }

    #[test]
    fn test_parse_search_garbage() {
        let ol = OpenLibrary::new();
        let query = Query::new("x", SearchMode::Title);
        let err = ol.parse_search(&query, 1, &response("<html>")).unwrap_err();
        assert!(err.is_decode());
    }

    #[test]
    fn test_detail_request() {
        let ol = OpenLibrary::new();
        let request = ol.detail_request("/works/OL82586W").unwrap();
        assert_eq!(
            request.full_url().unwrap(),
            "https://openlibrary.org/works/OL82586W.json"
        );
        assert!(ol.detail_request("OL1M").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_detail_description_shapes() {
        let ol = OpenLibrary::new();

        let plain = r#"{"title": "Dune", "description": "Spice.", "subjects": ["Sand"], "covers": [-1, 42]}"#;
        let detail = ol.parse_detail("/works/OL1W", &response(plain)).unwrap();
        assert_eq!(detail.description.as_deref(), Some("Spice."));
        assert_eq!(detail.subjects, vec!["Sand"]);
        assert_eq!(
            detail.thumbnail.as_deref(),
            Some("https://covers.openlibrary.org/b/id/42-L.jpg")
        );
        assert_eq!(detail.url.as_deref(), Some("https://openlibrary.org/works/OL1W"));

        let typed = r#"{"description": {"type": "/type/text", "value": "Worms."}}"#;
        let detail = ol.parse_detail("/works/OL1W", &response(typed)).unwrap();
        assert_eq!(detail.description.as_deref(), Some("Worms."));
        assert!(detail.subjects.is_empty());
        assert!(detail.thumbnail.is_none());
    }

    #[test]
    fn test_parse_detail_odd_description() {
        let ol = OpenLibrary::new();

        for body in [
            r#"{"title": "X", "description": {"type": "/type/text"}}"#,
            r#"{"title": "X", "description": 42}"#,
            r#"{"title": "X", "description": {"type": "/type/text", "value": 5}}"#,
            r#"{"title": "X", "description": null}"#,
        ] {
            let detail = ol.parse_detail("/works/OL1W", &response(body)).unwrap();
            assert_eq!(detail.title.as_deref(), Some("X"));
            assert!(detail.description.is_none(), "{}", body);
        }
    }

    #[test]
    fn test_init_from_config() {
        let mut ol = OpenLibrary::new();
        let config = CatalogConfig {
            name: "books".to_string(),
            catalog: "openlibrary".to_string(),
            base_url: Some("http://127.0.0.1:9000/".to_string()),
            page_size: 5,
            default_mode: Some(SearchMode::Author),
            ..Default::default()
        };
        ol.init(&config).unwrap();
        assert_eq!(ol.page_size(), 5);
        assert_eq!(ol.default_mode(), SearchMode::Author);
        assert_eq!(
            ol.detail_request("/works/OL1W").unwrap().url,
            "http://127.0.0.1:9000/works/OL1W.json"
        );

        let bad = CatalogConfig {
            default_mode: Some(SearchMode::Quick),
            ..Default::default()
        };
        assert!(OpenLibrary::new().init(&bad).is_err());
    }
}
