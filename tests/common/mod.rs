#![allow(dead_code)]

use catalog_explorer::config::CatalogConfig;
use catalog_explorer::{CatalogLoader, Explorer, HttpClient};
use serde_json::{json, Value};
use std::collections::HashMap;
use tracing_subscriber::EnvFilter;
use wiremock::MockServer;

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// OpenLibrary explorer pointed at a mock server
pub fn openlibrary(server: &MockServer) -> Explorer {
    openlibrary_with_headers(server, HashMap::new())
}

pub fn openlibrary_with_headers(server: &MockServer, headers: HashMap<String, String>) -> Explorer {
    init_tracing();
    let config = CatalogConfig {
        name: "books".to_string(),
        catalog: "openlibrary".to_string(),
        base_url: Some(server.uri()),
        headers,
        ..Default::default()
    };
    let catalog = CatalogLoader::create_catalog(&config).unwrap();
    Explorer::new(catalog, HttpClient::new().unwrap())
}

/// Wikipedia explorer pointed at a mock server
pub fn wikipedia(server: &MockServer) -> Explorer {
    init_tracing();
    let config = CatalogConfig {
        name: "wiki".to_string(),
        catalog: "wikipedia".to_string(),
        base_url: Some(server.uri()),
        ..Default::default()
    };
    let catalog = CatalogLoader::create_catalog(&config).unwrap();
    Explorer::new(catalog, HttpClient::new().unwrap())
}

/// OpenLibrary search body with `count` docs keyed `/works/{prefix}{n}W`
pub fn ol_page(prefix: &str, start: u64, count: u64, total: u64) -> Value {
    let docs: Vec<Value> = (start..start + count)
        .map(|n| {
            json!({
                "key": format!("/works/{}{}W", prefix, n),
                "title": format!("{} volume {}", prefix, n),
                "author_name": ["J. K. Rowling"],
                "first_publish_year": 1997,
                "cover_i": 1000 + n,
            })
        })
        .collect();

    json!({
        "numFound": total,
        "num_found": total,
        "start": start,
        "docs": docs,
    })
}

pub fn ol_work(description: &str) -> Value {
    json!({
        "title": "A work",
        "description": { "type": "/type/text", "value": description },
        "subjects": ["Magic", "Schools", "Wizards"],
        "covers": [8231856],
    })
}

pub fn wiki_summary(title: &str, extract: &str) -> Value {
    json!({
        "type": "standard",
        "title": title,
        "description": "Test article",
        "extract": extract,
        "thumbnail": { "source": format!("https://upload.wikimedia.org/{}.jpg", title) },
        "content_urls": { "desktop": { "page": format!("https://en.wikipedia.org/wiki/{}", title) } },
    })
}

pub fn wiki_search(offset: u64, count: u64, total: u64) -> Value {
    let hits: Vec<Value> = (offset..offset + count)
        .map(|n| {
            json!({
                "ns": 0,
                "title": format!("Article{}", n),
                "pageid": 100 + n,
                "snippet": format!("about <span class=\"searchmatch\">topic</span> {}", n),
                "timestamp": "2023-04-05T06:07:08Z",
            })
        })
        .collect();

    json!({
        "batchcomplete": "",
        "query": {
            "searchinfo": { "totalhits": total },
            "search": hits,
        }
    })
}

pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}
