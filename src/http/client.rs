//! HTTP client
//!
//! A thin wrapper over `reqwest` that:
//! - joins request paths onto a profile's base URL
//! - applies default headers, per-request headers, query and body
//! - reads every response fully so the connection is released on all paths
//! - maps non-success statuses to [`Error::Request`]
//!
//! No retry and no rate limiting: a failed request is fatal to the run.

use crate::error::{Error, Result};
use crate::types::StringMap;
use reqwest::header::HeaderMap;
use reqwest::{Client, Method, StatusCode};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Debug, Clone)]
pub struct HttpClientConfig {
    /// Base URL for relative request paths
    pub base_url: Option<String>,
    /// Per-request timeout
    pub timeout: Duration,
    /// Default headers for all requests
    pub default_headers: StringMap,
    /// User agent string
    pub user_agent: String,
    /// Skip TLS certificate verification (sandbox controllers use self-signed certs)
    pub accept_invalid_certs: bool,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            timeout: Duration::from_secs(30),
            default_headers: StringMap::new(),
            user_agent: format!("netops-rest/{}", env!("CARGO_PKG_VERSION")),
            accept_invalid_certs: false,
        }
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Add a default header
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.config.default_headers.insert(key.into(), value.into());
        self
    }

    /// Set user agent
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.config.user_agent = agent.into();
        self
    }

    /// Accept self-signed or otherwise invalid certificates
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config.accept_invalid_certs = accept;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Body of a single request
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// JSON body
    Json(Value),
    /// `application/x-www-form-urlencoded` body
    Form(Vec<(String, String)>),
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: StringMap,
    /// Request headers
    pub headers: StringMap,
    /// Request body
    pub body: RequestBody,
    /// HTTP Basic credentials for this request only
    pub basic_auth: Option<(String, String)>,
    /// Override timeout for this request
    pub timeout: Option<Duration>,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add several headers
    #[must_use]
    pub fn headers<I, K, V>(mut self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in headers {
            self.headers.insert(key.into(), value.into());
        }
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Set form body
    #[must_use]
    pub fn form<I, K, V>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.body = RequestBody::Form(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        );
        self
    }

    /// Use HTTP Basic authentication
    #[must_use]
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.basic_auth = Some((username.into(), password.into()));
        self
    }

    /// Set timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}

/// A fully-read HTTP response
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status
    pub status: StatusCode,
    /// Final URL (after redirects)
    pub url: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Response body as text
    pub body: String,
}

impl HttpResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// First value of a header, if present and valid UTF-8
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Fail with [`Error::Request`] unless the status is 2xx
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::request(self.status.as_u16(), self.body))
        }
    }
}

/// HTTP client
#[derive(Clone)]
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpClientConfig::default())
    }

    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the client configuration
    pub fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    /// Make a GET request
    pub async fn get(&self, url: &str, config: RequestConfig) -> Result<HttpResponse> {
        self.send(Method::GET, url, config).await
    }

    /// Make a POST request
    pub async fn post(&self, url: &str, config: RequestConfig) -> Result<HttpResponse> {
        self.send(Method::POST, url, config).await
    }

    /// Send a request and read the whole response
    ///
    /// Any status is returned as-is; use [`HttpResponse::error_for_status`]
    /// to reject non-success responses.
    pub async fn send(
        &self,
        method: Method,
        url: &str,
        config: RequestConfig,
    ) -> Result<HttpResponse> {
        let full_url = self.build_url(url);
        let mut req = self.client.request(method.clone(), &full_url);

        // A form body carries its own content type
        let is_form = matches!(config.body, RequestBody::Form(_));
        for (key, value) in self.config.default_headers.iter().chain(&config.headers) {
            if is_form && key.eq_ignore_ascii_case("content-type") {
                continue;
            }
            req = req.header(key.as_str(), value.as_str());
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        match config.body {
            RequestBody::Empty => {}
            RequestBody::Json(ref body) => req = req.json(body),
            RequestBody::Form(ref fields) => req = req.form(fields),
        }

        if let Some((ref username, ref password)) = config.basic_auth {
            req = req.basic_auth(username, Some(password));
        }

        if let Some(timeout) = config.timeout {
            req = req.timeout(timeout);
        }

        let response = req.send().await?;
        let status = response.status();
        let final_url = response.url().to_string();
        let headers = response.headers().clone();
        let body = response.text().await?;

        debug!(
            "HTTP {} {} -> {} ({} bytes)",
            method,
            final_url,
            status.as_u16(),
            body.len()
        );

        Ok(HttpResponse {
            status,
            url: final_url,
            headers,
            body,
        })
    }

    /// Build full URL from path
    pub fn build_url(&self, path: &str) -> String {
        match &self.config.base_url {
            Some(base) => join_url(base, path),
            None => path.to_string(),
        }
    }
}

/// Join a path onto a base URL; absolute URLs pass through untouched
pub fn join_url(base: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.config.base_url)
            .field("timeout", &self.config.timeout)
            .field("accept_invalid_certs", &self.config.accept_invalid_certs)
            .finish_non_exhaustive()
    }
}
