//! Catalog registry for opening explorers by name

use super::traits::Catalog;
use crate::config::RecorderSettings;
use crate::network::HttpClient;
use crate::search::Explorer;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Registry of configured catalogs
#[derive(Default)]
pub struct CatalogRegistry {
    catalogs: BTreeMap<String, Arc<dyn Catalog>>,
}

impl CatalogRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a catalog under a name, replacing any previous one
    pub fn register(&mut self, name: impl Into<String>, catalog: Arc<dyn Catalog>) {
        self.catalogs.insert(name.into(), catalog);
    }

    /// Get a catalog by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Catalog>> {
        self.catalogs.get(name).cloned()
    }

    /// Open a fresh explorer over the named catalog.
    ///
    /// Every call returns an independent explorer with its own state.
    pub fn open(
        &self,
        name: &str,
        client: HttpClient,
        recorder: &RecorderSettings,
    ) -> Option<Explorer> {
        let catalog = self.get(name)?;
        Some(Explorer::new(catalog, client).with_copied_ack(recorder.copied_ack()))
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        self.catalogs.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.catalogs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.catalogs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalogs::{OpenLibrary, Wikipedia};

    #[test]
    fn test_register_and_open() {
        let mut registry = CatalogRegistry::new();
        assert!(registry.is_empty());
        registry.register("books", Arc::new(OpenLibrary::new()));
        registry.register("wiki", Arc::new(Wikipedia::new()));

        assert_eq!(registry.names(), vec!["books", "wiki"]);
        assert_eq!(registry.get("books").unwrap().name(), "openlibrary");

        let client = HttpClient::new().unwrap();
        let settings = RecorderSettings::default();
        let a = registry.open("books", client.clone(), &settings).unwrap();
        let b = registry.open("books", client.clone(), &settings).unwrap();
        a.set_query("dune");
        assert_eq!(b.query().text, "");
        assert!(registry.open("missing", client, &settings).is_none());
    }
}
