//! Detail cache
//!
//! Fetched detail payloads keyed by result key, plus the expand/collapse
//! state that decides when a fetch is needed. Entries live as long as the
//! explorer: no TTL, no capacity bound.

use crate::errors::ExplorerError;
use crate::results::DetailPayload;
use moka::future::Cache;
use std::collections::HashMap;
use std::future::Future;
use std::sync::{Arc, RwLock};

/// Detail payloads and expansion state of one explorer
#[derive(Clone)]
pub struct DetailCache {
    cache: Cache<String, DetailPayload>,
    expanded: Arc<RwLock<HashMap<String, bool>>>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self {
            cache: Cache::builder().build(),
            expanded: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Flip the expansion state of `key` and return the new state
    pub fn toggle(&self, key: &str) -> bool {
        let mut expanded = self.expanded.write().unwrap();
        let entry = expanded.entry(key.to_string()).or_insert(false);
        *entry = !*entry;
        *entry
    }

    pub fn is_expanded(&self, key: &str) -> bool {
        self.expanded
            .read()
            .unwrap()
            .get(key)
            .copied()
            .unwrap_or(false)
    }

    /// Whether a completed fetch is stored for `key`
    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    /// Get a cached payload
    pub async fn get(&self, key: &str) -> Option<DetailPayload> {
        self.cache.get(key).await
    }

    /// Return the cached payload or run `fetch` to fill it.
    ///
    /// Concurrent callers for the same key share one evaluation of `fetch`.
    /// A failed fetch stores nothing, so the next call runs it again.
    pub async fn get_or_fetch<F>(
        &self,
        key: &str,
        fetch: F,
    ) -> std::result::Result<DetailPayload, ExplorerError>
    where
        F: Future<Output = std::result::Result<DetailPayload, ExplorerError>>,
    {
        self.cache
            .try_get_with(key.to_string(), fetch)
            .await
            .map_err(|e| (*e).clone())
    }
}

impl Default for DetailCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn payload(text: &str) -> DetailPayload {
        DetailPayload {
            description: Some(text.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_toggle() {
        let cache = DetailCache::new();
        assert!(!cache.is_expanded("/works/OL1W"));
        assert!(cache.toggle("/works/OL1W"));
        assert!(cache.is_expanded("/works/OL1W"));
        assert!(!cache.toggle("/works/OL1W"));
        assert!(!cache.is_expanded("/works/OL1W"));
        assert!(!cache.is_expanded("/works/OL2W"));
    }

    #[tokio::test]
    async fn test_fetch_once() {
        let cache = DetailCache::new();
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let detail = cache
                .get_or_fetch("k", async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok(payload("first"))
                })
                .await
                .unwrap();
            assert_eq!(detail.description.as_deref(), Some("first"));
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(cache.contains("k"));
        assert_eq!(cache.get("k").await, Some(payload("first")));
    }

    #[tokio::test]
    async fn test_failure_not_cached() {
        let cache = DetailCache::new();

        let err = cache
            .get_or_fetch("k", async { Err(ExplorerError::Status(500)) })
            .await
            .unwrap_err();
        assert_eq!(err, ExplorerError::Status(500));
        assert!(!cache.contains("k"));
        assert!(cache.get("k").await.is_none());

        let detail = cache
            .get_or_fetch("k", async { Ok(payload("retry")) })
            .await
            .unwrap();
        assert_eq!(detail.description.as_deref(), Some("retry"));
    }
}
