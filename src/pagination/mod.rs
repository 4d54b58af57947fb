//! Pagination module
//!
//! Supports: Link Header, Next URL, single page
//!
//! # Overview
//!
//! A [`PaginatedFetcher`] issues one logical request and keeps following the
//! continuation a [`Paginator`] finds on each page, one request at a time.
//! Query parameters and the body go on the first request only; continuations
//! replace the URL and keep the headers. Records from every page are merged
//! into one vector in the order the server returned them.

mod fetcher;
mod strategies;
mod types;

pub use fetcher::{FetchRequest, PaginatedFetcher};
pub use strategies::{
    build_paginator, parse_link_header, LinkHeaderPaginator, NextUrlPaginator, NoPaginator,
};
pub use types::{
    FetchLimits, NextPage, Page, PaginationConfig, PaginationState, Paginator, DEFAULT_MAX_PAGES,
};
