// Allow common clippy pedantic lints that aren't critical for this codebase
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]

//! # netops-rest
//!
//! An authenticated, paginated REST client for network-management controller
//! APIs: dashboard, collaboration, campus and fabric controllers, SD-WAN and
//! RESTCONF orchestrators.
//!
//! ## Features
//!
//! - **Vendor handshakes**: static key, HTTP Basic, token exchange, and
//!   session cookie plus anti-forgery token
//! - **Pagination**: RFC 5988 `Link` headers or a next-URL body field, merged
//!   into one ordered result
//! - **Profiles**: YAML definitions with `${ENV_VAR}` interpolation, six
//!   built in
//! - **Fail fast**: non-success statuses, HTML error pages and malformed JSON
//!   all end the run with the server's own words
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use netops_rest::auth::{Authenticator, TokenProvider};
//! use netops_rest::http::HttpClient;
//! use netops_rest::pagination::{FetchRequest, PaginatedFetcher};
//! use netops_rest::{load_profile, Result};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<()> {
//!     let profile = load_profile("sdwan")?;
//!     let client = HttpClient::with_config(profile.http_config())?;
//!
//!     let credential = Authenticator::with_client(profile.auth_config()?, client.clone())
//!         .authenticate()
//!         .await?;
//!
//!     let devices = PaginatedFetcher::new(client, &profile.pagination_config()?)
//!         .with_records_path("data")
//!         .fetch(&FetchRequest::get("/dataservice/device").with_credential(&credential))
//!         .await?;
//!
//!     println!("{} devices", devices.len());
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐   ┌──────────────────┐   ┌────────────────────────┐
//! │   Profile    │──▶│  TokenProvider   │──▶│   PaginatedFetcher     │
//! │ YAML + ${ENV}│   │  → Credential    │   │ Link / next URL / none │
//! └──────────────┘   └──────────────────┘   └────────────────────────┘
//!                             │                         │
//!                             └────────── HttpClient ───┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Token providers for the vendor handshakes
pub mod auth;

/// HTTP client
pub mod http;

/// Pagination strategies and the paginated fetcher
pub mod pagination;

/// Response decoders
pub mod decode;

/// Profile definitions
pub mod config;

/// Profile loader
pub mod loader;

/// Environment and path parameter interpolation
pub mod template;

/// Built-in profile definitions
pub mod profiles;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use auth::{AuthConfig, Authenticator, Credential, TokenProvider};
pub use config::Profile;
pub use loader::{load_profile, load_profile_from_str};
pub use pagination::{FetchRequest, PaginatedFetcher};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
