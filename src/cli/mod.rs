//! CLI module
//!
//! Command-line interface for talking to controller APIs.
//!
//! # Commands
//!
//! - `auth` - Run the handshake and show the redacted credential
//! - `get` - Authenticated, paginated GET
//! - `post` - Authenticated POST with a JSON body
//! - `run` - Execute a named request from the profile
//! - `list` - List built-in profiles
//! - `validate` - Check a profile

mod commands;
mod runner;

pub use commands::{Cli, Commands};
pub use runner::Runner;
