//! Error types for catalog explorers
//!
//! Every failure an explorer operation can produce. None of them is fatal:
//! the explorer is idle and retryable after any of these.

use thiserror::Error;

/// Main error type for explorer operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExplorerError {
    /// Input rejected before any request was made
    #[error("invalid input: {0}")]
    Validation(String),

    /// The request never produced a response
    #[error("network error: {0}")]
    Transport(String),

    /// Upstream answered with a non-2xx status
    #[error("Status {0}")]
    Status(u16),

    /// The response body did not have the expected shape
    #[error("invalid response: {0}")]
    Decode(String),

    /// A request URL could not be built from configuration
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type alias for explorer operations
pub type Result<T> = std::result::Result<T, ExplorerError>;

impl ExplorerError {
    /// Empty or whitespace-only query text
    pub fn empty_query() -> Self {
        ExplorerError::Validation("empty query".to_string())
    }

    /// Network failure or non-2xx status
    pub fn is_transport(&self) -> bool {
        matches!(self, ExplorerError::Transport(_) | ExplorerError::Status(_))
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ExplorerError::Validation(_))
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ExplorerError::Decode(_))
    }
}

impl From<reqwest::Error> for ExplorerError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ExplorerError::Status(status.as_u16()),
            None => ExplorerError::Transport(err.to_string()),
        }
    }
}

impl From<serde_json::Error> for ExplorerError {
    fn from(err: serde_json::Error) -> Self {
        ExplorerError::Decode(err.to_string())
    }
}

impl From<url::ParseError> for ExplorerError {
    fn from(err: url::ParseError) -> Self {
        ExplorerError::Config(err.to_string())
    }
}
