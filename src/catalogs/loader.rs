//! Catalog loader for initializing catalogs from configuration

use super::registry::CatalogRegistry;
use super::traits::Catalog;
use super::{openlibrary, wikipedia};
use crate::config::{CatalogConfig, Settings};
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Loader for initializing catalogs from configuration
pub struct CatalogLoader;

impl CatalogLoader {
    /// Load all enabled catalogs from settings
    pub fn load(settings: &Settings) -> Result<CatalogRegistry> {
        let mut registry = CatalogRegistry::new();

        let enabled = settings.enabled_catalogs();
        let skipped = settings.catalogs.len() - enabled.len();
        if skipped > 0 {
            info!("Skipping {} disabled catalogs", skipped);
        }

        for config in enabled {
            match Self::create_catalog(config) {
                Ok(catalog) => {
                    info!("Loaded catalog: {} ({})", config.name, config.catalog);
                    registry.register(config.name.clone(), catalog);
                }
                Err(e) => {
                    warn!("Failed to load catalog {}: {}", config.name, e);
                }
            }
        }

        info!("Loaded {} catalogs", registry.len());
        Ok(registry)
    }

    /// Create a catalog instance from its configuration
    pub fn create_catalog(config: &CatalogConfig) -> Result<Arc<dyn Catalog>> {
        let mut catalog: Box<dyn Catalog> = match config.catalog.as_str() {
            "openlibrary" => Box::new(openlibrary::OpenLibrary::new()),
            "wikipedia" => Box::new(wikipedia::Wikipedia::new()),
            other => {
                return Err(anyhow::anyhow!("Unknown catalog type: {}", other));
            }
        };

        catalog.init(config)?;

        Ok(Arc::from(catalog))
    }
}
