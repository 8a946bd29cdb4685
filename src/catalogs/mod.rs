//! Catalog module
//!
//! Defines the Catalog trait and the search domains built on it.

mod loader;
mod registry;
mod traits;

// Catalog implementations
pub mod openlibrary;
pub mod wikipedia;

pub use loader::CatalogLoader;
pub use openlibrary::OpenLibrary;
pub use registry::CatalogRegistry;
pub use traits::*;
pub use wikipedia::Wikipedia;
