//! Authentication module
//!
//! Supports: Static API key, HTTP Basic, Token exchange, Session + anti-forgery token
//!
//! An `Authenticator` runs the handshake for its `AuthConfig` once and hands
//! back an immutable `Credential`, which callers merge into request headers.

mod authenticator;
mod types;

pub use authenticator::{Authenticator, TokenProvider};
pub use types::{
    AuthConfig, Credential, LoginPayload, DEFAULT_PASSWORD_FIELD, DEFAULT_USERNAME_FIELD,
    DEFAULT_XSRF_HEADER,
};

#[cfg(test)]
mod tests;
