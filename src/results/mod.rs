//! Result types and the container that accumulates them
//!
//! This module defines the result structures decoded from catalog responses.

mod container;
mod types;

pub use container::{ResultContainer, SearchTicket};
pub use types::*;
