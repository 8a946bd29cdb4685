//! HTTP client for making requests to catalog APIs

use super::user_agent::{accept_json, default_user_agent};
use crate::catalogs::{ApiRequest, ApiResponse, HttpMethod};
use crate::config::OutgoingSettings;
use crate::errors::Result;
use reqwest::{Client, Response};
use std::collections::HashMap;
use std::time::Duration;

/// HTTP client wrapper with explorer-specific configuration
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    user_agent: String,
    extra_headers: HashMap<String, String>,
}

impl HttpClient {
    /// Create a new HTTP client with default settings
    pub fn new() -> Result<Self> {
        Self::with_settings(&OutgoingSettings::default())
    }

    /// Create a new HTTP client with custom settings
    pub fn with_settings(settings: &OutgoingSettings) -> Result<Self> {
        let mut builder = Client::builder()
            .pool_max_idle_per_host(settings.pool_maxsize)
            .gzip(true)
            .brotli(true);

        // No timeout unless configured
        if let Some(seconds) = settings.request_timeout {
            builder = builder.timeout(Duration::from_secs_f64(seconds));
        }

        // SSL verification
        if !settings.verify_ssl {
            builder = builder.danger_accept_invalid_certs(true);
        }

        // Proxy settings
        if let Some(ref proxy_url) = settings.proxies.all {
            builder = builder.proxy(reqwest::Proxy::all(proxy_url)?);
        } else {
            if let Some(ref http) = settings.proxies.http {
                builder = builder.proxy(reqwest::Proxy::http(http)?);
            }
            if let Some(ref https) = settings.proxies.https {
                builder = builder.proxy(reqwest::Proxy::https(https)?);
            }
        }

        let client = builder.build()?;

        Ok(Self {
            client,
            user_agent: default_user_agent(settings.useragent_suffix.as_deref()),
            extra_headers: settings.extra_headers.clone(),
        })
    }

    /// Execute a catalog request. Non-2xx statuses are returned, not raised.
    pub async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = request.full_url()?;

        let mut req_builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
        };

        // Set default headers
        req_builder = req_builder
            .header("User-Agent", &self.user_agent)
            .header("Accept", accept_json());

        for (key, value) in &self.extra_headers {
            req_builder = req_builder.header(key, value);
        }

        // Add custom headers
        for (key, value) in &request.headers {
            req_builder = req_builder.header(key, value);
        }

        let response = req_builder.send().await?;

        Self::parse_response(response).await
    }

    /// Simple GET request
    pub async fn get(&self, url: &str) -> Result<ApiResponse> {
        self.execute(ApiRequest::get(url)).await
    }

    /// Parse response into ApiResponse
    async fn parse_response(response: Response) -> Result<ApiResponse> {
        let status = response.status().as_u16();
        let text = response.text().await?;

        Ok(ApiResponse { status, text })
    }

    /// Get current user agent
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_client_creation() {
        let client = HttpClient::new();
        assert!(client.is_ok());
        assert!(client.unwrap().user_agent().starts_with("catalog-explorer/"));
    }

    #[tokio::test]
    async fn test_execute_sends_params_and_headers() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search.json"))
            .and(query_param("title", "harry potter"))
            .and(header("X-Api-Key", "k"))
            .and(header("X-Instance", "test"))
            .respond_with(ResponseTemplate::new(200).set_body_string("{}"))
            .expect(1)
            .mount(&server)
            .await;

        let mut settings = OutgoingSettings::default();
        settings
            .extra_headers
            .insert("X-Instance".to_string(), "test".to_string());
        let client = HttpClient::with_settings(&settings).unwrap();

        let request = ApiRequest::get(format!("{}/search.json", server.uri()))
            .param("title", "harry potter")
            .header("X-Api-Key", "k");
        let response = client.execute(request).await.unwrap();

        assert!(response.is_success());
        assert_eq!(response.text, "{}");
    }

    #[tokio::test]
    async fn test_error_status_is_returned() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(503))
            .mount(&server)
            .await;

        let client = HttpClient::new().unwrap();
        let response = client.get(&format!("{}/x", server.uri())).await.unwrap();
        assert_eq!(response.status, 503);
        assert!(!response.is_success());
    }

    #[tokio::test]
    async fn test_connection_refused_is_transport() {
        let client = HttpClient::new().unwrap();
        let err = client.get("http://127.0.0.1:9/nothing").await.unwrap_err();
        assert!(err.is_transport());
    }
}
