//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Authenticated, paginated REST client for network-management controllers
#[derive(Parser, Debug)]
#[command(name = "netops-rest")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Profile: built-in name (meraki, webex, dnac, apic, sdwan, nso) or YAML file
    #[arg(short, long, global = true)]
    pub profile: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the profile's page ceiling
    #[arg(long, global = true)]
    pub max_pages: Option<u32>,

    /// Overall deadline for a fetch, in seconds
    #[arg(long, global = true)]
    pub deadline_secs: Option<u64>,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the authentication handshake and show the (redacted) credential
    Auth,

    /// Authenticated GET, following pagination
    Get {
        /// Path relative to the profile's base URL, or an absolute URL
        path: String,

        /// Query parameter for the first request (repeatable)
        #[arg(short, long = "query", value_parser = parse_key_val)]
        query: Vec<(String, String)>,

        /// Path to the records in each page (overrides the profile)
        #[arg(long)]
        records_path: Option<String>,
    },

    /// Authenticated POST with a JSON body
    Post {
        /// Path relative to the profile's base URL, or an absolute URL
        path: String,

        /// JSON request body
        #[arg(short, long)]
        data: String,

        /// Path to the records in the response
        #[arg(long)]
        records_path: Option<String>,
    },

    /// Execute a named request from the profile
    Run {
        /// Request name (see `list`)
        request: String,

        /// Value for a `{name}` placeholder (repeatable)
        #[arg(short = 'P', long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
    },

    /// List built-in profiles and their requests
    List,

    /// Load and interpolate the profile, reporting problems
    Validate,
}

/// Parse `key=value`
fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got '{s}'"))?;
    if key.is_empty() {
        return Err(format!("empty key in '{s}'"));
    }
    Ok((key.to_string(), value.to_string()))
}
