//! Response decoder module
//!
//! Turns response bodies into JSON and pages into records.
//!
//! # Overview
//!
//! Controllers sometimes answer with an HTML error page (occasionally with a
//! 200 status) where JSON was expected. Every body is checked for that before
//! JSON decoding is attempted, so the failure surfaces as
//! [`Error::UnexpectedContent`](crate::Error::UnexpectedContent) rather than
//! a confusing parse error.

mod decoders;
mod types;

pub use decoders::{decode_json, extract_path, looks_like_html, JsonDecoder};
pub use types::RecordDecoder;
