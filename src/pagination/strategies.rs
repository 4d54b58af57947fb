//! Pagination strategy implementations
//!
//! Each strategy handles a specific continuation pattern.

use super::types::{NextPage, Page, PaginationConfig, PaginationState, Paginator};
use crate::decode::extract_path;
use serde_json::Value;
use tracing::warn;
use url::Url;

/// Build the paginator for a configured strategy
pub fn build_paginator(config: &PaginationConfig) -> Box<dyn Paginator> {
    match config {
        PaginationConfig::None => Box::new(NoPaginator),
        PaginationConfig::LinkHeader { rel } => Box::new(LinkHeaderPaginator::new(rel)),
        PaginationConfig::NextUrl { path } => Box::new(NextUrlPaginator::new(path)),
    }
}

/// Resolve a continuation reference against the URL of the page it came from
fn resolve(base: &str, reference: &str) -> Option<String> {
    match Url::parse(reference) {
        Ok(url) => Some(url.to_string()),
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            let joined = Url::parse(base).and_then(|b| b.join(reference));
            match joined {
                Ok(url) => Some(url.to_string()),
                Err(e) => {
                    warn!("Ignoring continuation '{reference}' relative to {base}: {e}");
                    None
                }
            }
        }
        Err(e) => {
            warn!("Ignoring malformed continuation '{reference}': {e}");
            None
        }
    }
}

// ============================================================================
// Link Header Pagination
// ============================================================================

/// Link header pagination (RFC 5988)
///
/// Follows `Link: <https://api.example.com/items?page=2>; rel="next"` until
/// the server stops sending a link with the wanted rel.
#[derive(Debug, Clone)]
pub struct LinkHeaderPaginator {
    /// Rel value to follow (default: "next")
    pub rel: String,
}

impl Default for LinkHeaderPaginator {
    fn default() -> Self {
        Self {
            rel: "next".to_string(),
        }
    }
}

impl LinkHeaderPaginator {
    /// Create a new link header paginator
    pub fn new(rel: impl Into<String>) -> Self {
        Self { rel: rel.into() }
    }
}

impl Paginator for LinkHeaderPaginator {
    fn process_response(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        let next = page
            .headers
            .get_all("link")
            .iter()
            .filter_map(|v| v.to_str().ok())
            .find_map(|header| parse_link_header(header, &self.rel))
            .and_then(|reference| resolve(&page.url, &reference));

        match next {
            Some(url) => NextPage::with_url(url),
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

/// Parse a Link header and extract the URL for the given rel
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="prev"
    for part in split_link_values(header) {
        let mut url = None;
        let mut matched = false;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                let rel_value = stripped.trim_matches('"').trim_matches('\'');
                // rel may hold several space-separated relation types
                matched = rel_value
                    .split_whitespace()
                    .any(|r| r.eq_ignore_ascii_case(target_rel));
            }
        }

        if let (Some(u), true) = (url, matched) {
            return Some(u.trim().to_string());
        }
    }

    None
}

/// Split a Link header into link-values, ignoring commas inside `<...>`
fn split_link_values(header: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut in_brackets = false;
    let mut start = 0;

    for (i, c) in header.char_indices() {
        match c {
            '<' => in_brackets = true,
            '>' => in_brackets = false,
            ',' if !in_brackets => {
                parts.push(header[start..i].trim());
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(header[start..].trim());
    parts.retain(|p| !p.is_empty());
    parts
}

// ============================================================================
// Next URL Pagination
// ============================================================================

/// Next URL pagination (URL in response body)
///
/// Extracts next page URL from a field in the response body.
/// Common patterns:
/// - `{ "next_url": "https://api.example.com/items?page=2" }`
/// - `{ "pagination": { "next": "..." } }`
///
/// A missing, null or empty field ends pagination.
#[derive(Debug, Clone)]
pub struct NextUrlPaginator {
    /// Path to the next URL in the response
    pub path: String,
}

impl NextUrlPaginator {
    /// Create a new next URL paginator
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl Paginator for NextUrlPaginator {
    fn process_response(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        let next = match extract_path(&page.body, &self.path) {
            Some(Value::String(s)) if !s.trim().is_empty() => resolve(&page.url, s.trim()),
            _ => None,
        };

        match next {
            Some(url) => NextPage::with_url(url),
            None => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn process_response(&self, _page: &Page, state: &mut PaginationState) -> NextPage {
        state.mark_done();
        NextPage::Done
    }
}
