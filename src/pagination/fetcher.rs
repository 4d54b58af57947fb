//! Paginated fetcher
//!
//! Issues a request, follows continuations one page at a time, and merges
//! every page's records into a single ordered vector.

use super::strategies::build_paginator;
use super::types::{FetchLimits, NextPage, Page, PaginationConfig, PaginationState, Paginator};
use crate::auth::Credential;
use crate::decode::{decode_json, JsonDecoder, RecordDecoder};
use crate::error::{Error, Result};
use crate::http::{HttpClient, RequestConfig};
use crate::types::{Method, StringMap};
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// One logical request, possibly spanning several pages
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// HTTP method of the first request
    pub method: Method,
    /// Path (joined onto the client's base URL) or absolute URL
    pub url: String,
    /// Headers sent on every page
    pub headers: StringMap,
    /// Query parameters, first request only
    pub query: StringMap,
    /// JSON body, first request only
    pub body: Option<Value>,
}

impl FetchRequest {
    /// Create a GET request
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(Method::GET, url)
    }

    /// Create a request with any method
    pub fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: StringMap::new(),
            query: StringMap::new(),
            body: None,
        }
    }

    /// Add a header
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Add a query parameter
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set JSON body
    #[must_use]
    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Merge a credential's headers into the request
    #[must_use]
    pub fn with_credential(mut self, credential: &Credential) -> Self {
        for (name, value) in credential.headers() {
            self.headers.insert(name.to_string(), value.to_string());
        }
        self
    }

    /// Request config for the first page
    fn first_page(&self) -> RequestConfig {
        let mut config = RequestConfig::new().headers(self.headers.clone());
        config.query = self.query.clone();
        if let Some(body) = &self.body {
            config = config.json(body.clone());
        }
        config
    }

    /// Request config for a continuation page
    fn continuation(&self) -> RequestConfig {
        RequestConfig::new().headers(self.headers.clone())
    }
}

/// Follows continuations and concatenates pages in arrival order
pub struct PaginatedFetcher {
    client: HttpClient,
    paginator: Box<dyn Paginator>,
    decoder: Box<dyn RecordDecoder>,
    limits: FetchLimits,
}

impl PaginatedFetcher {
    /// Create a fetcher for a pagination strategy, merging whole pages
    pub fn new(client: HttpClient, pagination: &PaginationConfig) -> Self {
        Self {
            client,
            paginator: build_paginator(pagination),
            decoder: Box::new(JsonDecoder::new()),
            limits: FetchLimits::default(),
        }
    }

    /// Use a custom record decoder
    #[must_use]
    pub fn with_decoder(mut self, decoder: Box<dyn RecordDecoder>) -> Self {
        self.decoder = decoder;
        self
    }

    /// Take records from this path of every page
    #[must_use]
    pub fn with_records_path(self, path: impl Into<String>) -> Self {
        self.with_decoder(Box::new(JsonDecoder::with_path(path)))
    }

    /// Set the page ceiling and deadline
    #[must_use]
    pub fn with_limits(mut self, limits: FetchLimits) -> Self {
        self.limits = limits;
        self
    }

    /// The configured limits
    pub fn limits(&self) -> FetchLimits {
        self.limits
    }

    /// Fetch every page and return the merged records
    pub async fn fetch(&self, request: &FetchRequest) -> Result<Vec<Value>> {
        let started = Instant::now();
        let mut state = PaginationState::new();
        let mut records = Vec::new();
        let mut next_url: Option<String> = None;

        loop {
            let (method, url, config) = match &next_url {
                None => (request.method, request.url.as_str(), request.first_page()),
                Some(url) => (Method::GET, url.as_str(), request.continuation()),
            };

            let mut page = match self.limits.deadline {
                Some(deadline) => {
                    let remaining = deadline.saturating_sub(started.elapsed());
                    if remaining.is_zero() {
                        return Err(deadline_exceeded(deadline, state.pages));
                    }
                    tokio::time::timeout(remaining, self.fetch_page(method, url, config))
                        .await
                        .map_err(|_| deadline_exceeded(deadline, state.pages))??
                }
                None => self.fetch_page(method, url, config).await?,
            };
            state.next_page();

            page.next = self.paginator.process_response(&page, &mut state);
            let Page { url, body, next, .. } = page;

            let page_records = self.decoder.records(body)?;
            state.add_fetched(page_records.len() as u64);

            debug!(
                "Page {}: {} records from {url}",
                state.pages,
                page_records.len()
            );
            records.extend(page_records);

            match next {
                NextPage::Done => break,
                NextPage::Continue { url } => {
                    if state.pages >= self.limits.max_pages {
                        return Err(Error::PageLimitExceeded {
                            max_pages: self.limits.max_pages,
                        });
                    }
                    next_url = Some(url);
                }
            }
        }

        info!(
            "Fetched {} records in {} pages from {} ({}ms)",
            records.len(),
            state.pages,
            request.url,
            started.elapsed().as_millis()
        );

        Ok(records)
    }

    /// Issue one request and decode its body into a page
    async fn fetch_page(&self, method: Method, url: &str, config: RequestConfig) -> Result<Page> {
        let response = self
            .client
            .send(method.into(), url, config)
            .await?
            .error_for_status()?;

        let body = decode_json(&response.url, &response.body)?;
        Ok(Page::new(response, body))
    }
}

impl std::fmt::Debug for PaginatedFetcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaginatedFetcher")
            .field("client", &self.client)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

fn deadline_exceeded(deadline: Duration, pages: u32) -> Error {
    Error::DeadlineExceeded {
        deadline_ms: deadline.as_millis() as u64,
        pages,
    }
}
