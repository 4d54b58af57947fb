//! HTTP client module
//!
//! Provides the HTTP client shared by the token providers and the paginated
//! fetcher.
//!
//! # Features
//!
//! - **Base URL joining**: profile requests use paths relative to the controller
//! - **Default headers**: content negotiation headers applied to every request
//! - **Sandbox TLS**: optional acceptance of self-signed controller certificates
//! - **Whole-body reads**: responses are buffered so connections are always released

mod client;

pub use client::{
    join_url, HttpClient, HttpClientConfig, HttpClientConfigBuilder, HttpResponse, RequestBody,
    RequestConfig,
};
