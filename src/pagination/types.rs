//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::http::HttpResponse;
use reqwest::header::HeaderMap;
use serde_json::Value;
use std::time::Duration;

/// Default ceiling on the number of pages one fetch may retrieve
pub const DEFAULT_MAX_PAGES: u32 = 1000;

/// Result of the next page computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NextPage {
    /// Another page is available at this URL
    Continue {
        /// Continuation URL, absolute
        url: String,
    },
    /// No more pages
    Done,
}

impl NextPage {
    /// Create a continuation to a URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self::Continue { url: url.into() }
    }

    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue { .. })
    }

    /// The continuation URL, if any
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Continue { url } => Some(url),
            Self::Done => None,
        }
    }
}

/// Continuation strategy, selected per profile
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PaginationConfig {
    /// Single page
    #[default]
    None,

    /// Link header pagination (RFC 5988)
    LinkHeader {
        /// Rel value to follow (default: "next")
        rel: String,
    },

    /// Next URL in response body
    NextUrl {
        /// Path to the next URL in the response (e.g., "next_url")
        path: String,
    },
}

impl PaginationConfig {
    /// Create link header pagination config
    pub fn link_header(rel: impl Into<String>) -> Self {
        Self::LinkHeader { rel: rel.into() }
    }

    /// Create next URL pagination config
    pub fn next_url(path: impl Into<String>) -> Self {
        Self::NextUrl { path: path.into() }
    }
}

/// Bounds on a single fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchLimits {
    /// Maximum number of pages before the fetch fails
    pub max_pages: u32,
    /// Overall wall-clock budget for the fetch
    pub deadline: Option<Duration>,
}

impl Default for FetchLimits {
    fn default() -> Self {
        Self {
            max_pages: DEFAULT_MAX_PAGES,
            deadline: None,
        }
    }
}

impl FetchLimits {
    /// Set the page ceiling
    pub fn max_pages(mut self, max_pages: u32) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set the overall deadline
    pub fn deadline(mut self, deadline: Duration) -> Self {
        self.deadline = Some(deadline);
        self
    }
}

/// Tracks pagination progress during one fetch
#[derive(Debug, Clone, Default)]
pub struct PaginationState {
    /// Pages retrieved so far
    pub pages: u32,
    /// Records merged so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl PaginationState {
    /// Create a new pagination state
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Count one retrieved page
    pub fn next_page(&mut self) {
        self.pages += 1;
    }

    /// Add to total fetched
    pub fn add_fetched(&mut self, count: u64) {
        self.total_fetched += count;
    }
}

/// One successfully decoded response
#[derive(Debug, Clone)]
pub struct Page {
    /// Response status
    pub status: u16,
    /// Final URL of the request that produced this page
    pub url: String,
    /// Response headers
    pub headers: HeaderMap,
    /// Decoded JSON body
    pub body: Value,
    /// Where the next page lives, as computed by the paginator
    pub next: NextPage,
}

impl Page {
    /// Build a page from a response whose body has already been decoded
    ///
    /// The continuation starts out as [`NextPage::Done`]; the fetcher fills
    /// it in from its paginator.
    pub fn new(response: HttpResponse, body: Value) -> Self {
        Self {
            status: response.status.as_u16(),
            url: response.url,
            headers: response.headers,
            body,
            next: NextPage::Done,
        }
    }
}

/// Core trait for pagination strategies
///
/// A strategy inspects a page (headers and body) and says whether another
/// page follows. It never touches the request; continuation URLs replace the
/// request URL wholesale.
pub trait Paginator: Send + Sync {
    /// Process a page and determine if there's a next page
    fn process_response(&self, page: &Page, state: &mut PaginationState) -> NextPage;
}
