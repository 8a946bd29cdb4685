//! Endpoint recorder
//!
//! Remembers the last request an explorer issued so it can be shown, opened
//! or copied. Every outbound call overwrites it, detail fetches included.

use crate::catalogs::{ApiRequest, HttpMethod};
use crate::errors::Result;
use std::fmt;
use std::sync::{Arc, RwLock};
use std::time::{Duration, Instant};

/// Descriptor of the most recent request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastEndpoint {
    /// Full URL including the query string
    pub url: String,
    pub method: HttpMethod,
    /// Names of the request-specific headers, values omitted
    pub headers: Vec<String>,
}

impl LastEndpoint {
    pub fn from_request(request: &ApiRequest) -> Result<Self> {
        Ok(Self {
            url: request.full_url()?,
            method: request.method,
            headers: request.header_names(),
        })
    }

    /// Comma-separated header names, or "none"
    pub fn headers_summary(&self) -> String {
        if self.headers.is_empty() {
            "none".to_string()
        } else {
            self.headers.join(", ")
        }
    }

    /// Equivalent curl command line
    pub fn curl(&self) -> String {
        format!("curl \"{}\"", self.url)
    }
}

impl fmt::Display for LastEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method.as_str(), self.url)
    }
}

#[derive(Debug, Default)]
struct RecorderState {
    last: Option<LastEndpoint>,
    copied_at: Option<Instant>,
}

/// Last-request recorder with a transient "copied" acknowledgement
#[derive(Debug, Clone)]
pub struct EndpointRecorder {
    state: Arc<RwLock<RecorderState>>,
    ack: Duration,
}

impl EndpointRecorder {
    pub fn new(ack: Duration) -> Self {
        Self {
            state: Arc::new(RwLock::new(RecorderState::default())),
            ack,
        }
    }

    /// Overwrite the last endpoint; clears any pending "copied" flag
    pub fn record(&self, endpoint: LastEndpoint) {
        let mut state = self.state.write().unwrap();
        state.last = Some(endpoint);
        state.copied_at = None;
    }

    pub fn last(&self) -> Option<LastEndpoint> {
        self.state.read().unwrap().last.clone()
    }

    /// The URL to put on the clipboard. Raises the "copied" flag, which
    /// drops by itself once the acknowledgement window has passed.
    pub fn copy(&self) -> Option<String> {
        let mut state = self.state.write().unwrap();
        let url = state.last.as_ref()?.url.clone();
        state.copied_at = Some(Instant::now());
        Some(url)
    }

    pub fn is_copied(&self) -> bool {
        self.state
            .read()
            .unwrap()
            .copied_at
            .map(|at| at.elapsed() < self.ack)
            .unwrap_or(false)
    }
}

impl Default for EndpointRecorder {
    fn default() -> Self {
        Self::new(Duration::from_millis(crate::DEFAULT_COPIED_ACK_MS))
    }
}
