//! HTTP networking module
//!
//! Provides HTTP client functionality for making requests to catalog APIs.

mod client;
mod user_agent;

pub use client::HttpClient;
pub use user_agent::{accept_language, default_user_agent};
