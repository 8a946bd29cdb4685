//! Search orchestration module
//!
//! The explorer ties the query store, result accumulation, detail cache and
//! endpoint recorder together for one catalog.

mod executor;
mod models;

pub use executor::Explorer;
pub use models::*;
