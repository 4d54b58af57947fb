//! CLI runner - executes commands

use crate::auth::{Authenticator, Credential, TokenProvider};
use crate::cli::commands::{Cli, Commands};
use crate::config::Profile;
use crate::error::{Error, Result, ResultExt};
use crate::http::HttpClient;
use crate::loader::{load_profile, parse_profile_raw};
use crate::pagination::{FetchLimits, FetchRequest, PaginatedFetcher, PaginationConfig};
use crate::profiles::{get_builtin, is_builtin, list_builtin};
use crate::template::extract_variables;
use crate::types::Method;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::time::Duration;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        match &self.cli.command {
            Commands::Auth => self.auth().await,
            Commands::Get {
                path,
                query,
                records_path,
            } => self.get(path, query, records_path.as_deref()).await,
            Commands::Post {
                path,
                data,
                records_path,
            } => self.post(path, data, records_path.as_deref()).await,
            Commands::Run { request, params } => self.run_request(request, params).await,
            Commands::List => self.list_profiles(),
            Commands::Validate => self.validate(),
        }
    }

    /// Load the selected profile
    fn load_profile(&self) -> Result<Profile> {
        let path = self
            .cli
            .profile
            .as_ref()
            .ok_or_else(|| Error::config("Profile not specified (use -p flag)"))?;
        load_profile(path)
    }

    /// Build the client and run the handshake
    async fn connect(&self, profile: &Profile) -> Result<(HttpClient, Credential)> {
        let client = HttpClient::with_config(profile.http_config())?;
        let authenticator = Authenticator::with_client(profile.auth_config()?, client.clone());
        let credential = authenticator.authenticate().await?;
        info!(
            "Authenticated to '{}' with {} strategy",
            profile.name,
            authenticator.config().kind()
        );
        Ok((client, credential))
    }

    /// Fetch limits from the profile, with command-line overrides
    fn limits(&self, profile: &Profile) -> FetchLimits {
        let mut limits = profile.fetch_limits();
        if let Some(max_pages) = self.cli.max_pages {
            limits = limits.max_pages(max_pages);
        }
        if let Some(secs) = self.cli.deadline_secs {
            limits = limits.deadline(Duration::from_secs(secs));
        }
        limits
    }

    /// Build a fetcher for a profile
    fn fetcher(
        &self,
        profile: &Profile,
        client: HttpClient,
        pagination: &PaginationConfig,
        records_path: Option<&str>,
    ) -> PaginatedFetcher {
        let fetcher =
            PaginatedFetcher::new(client, pagination).with_limits(self.limits(profile));
        match records_path {
            Some(path) => fetcher.with_records_path(path),
            None => fetcher,
        }
    }

    /// Run the handshake and print the redacted credential
    async fn auth(&self) -> Result<()> {
        let profile = self.load_profile()?;
        let (_, credential) = self.connect(&profile).await?;

        self.output(&json!({
            "profile": profile.name,
            "strategy": profile.auth_config()?.kind(),
            "credential": credential.redacted(),
        }))
    }

    /// Authenticated, paginated GET
    async fn get(
        &self,
        path: &str,
        query: &[(String, String)],
        records_path: Option<&str>,
    ) -> Result<()> {
        let profile = self.load_profile()?;
        let (client, credential) = self.connect(&profile).await?;

        let mut request = FetchRequest::get(path).with_credential(&credential);
        for (key, value) in query {
            request = request.query(key, value);
        }

        let records_path = records_path.or(profile.records_path(None));
        let fetcher = self.fetcher(&profile, client, &profile.pagination_config()?, records_path);
        let records = fetcher.fetch(&request).await?;
        self.output(&Value::Array(records))
    }

    /// Authenticated POST; the response is a single page
    async fn post(&self, path: &str, data: &str, records_path: Option<&str>) -> Result<()> {
        let body: Value = serde_json::from_str(data)
            .map_err(|e| Error::invalid_value("--data", format!("not valid JSON: {e}")))?;

        let profile = self.load_profile()?;
        let (client, credential) = self.connect(&profile).await?;

        let request = FetchRequest::new(Method::POST, path)
            .json(body)
            .with_credential(&credential);

        let fetcher = self.fetcher(&profile, client, &PaginationConfig::None, records_path);
        let records = fetcher.fetch(&request).await?;
        self.output(&unwrap_single(records))
    }

    /// Execute a named request from the profile
    async fn run_request(&self, name: &str, params: &[(String, String)]) -> Result<()> {
        let profile = self.load_profile()?;
        let definition = profile.request(name)?;

        let params: HashMap<String, String> = params.iter().cloned().collect();
        let request = definition.to_fetch_request(&params)?;

        let (client, credential) = self.connect(&profile).await?;
        let request = request.with_credential(&credential);

        let pagination = match definition.method {
            Method::GET => profile.pagination_config()?,
            _ => PaginationConfig::None,
        };
        let fetcher = self.fetcher(
            &profile,
            client,
            &pagination,
            profile.records_path(Some(definition)),
        );
        let records = fetcher.fetch(&request).await?;

        match definition.method {
            Method::GET => self.output(&Value::Array(records)),
            _ => self.output(&unwrap_single(records)),
        }
    }

    /// List built-in profiles and their requests
    fn list_profiles(&self) -> Result<()> {
        let mut profiles = Vec::new();

        for name in list_builtin() {
            let profile =
                parse_profile_raw(name).with_context(|| format!("Built-in profile '{name}'"))?;
            let auth = serde_json::to_value(&profile.auth)?;

            let mut env: Vec<String> = get_builtin(name)
                .map(extract_variables)
                .unwrap_or_default();
            env.sort();
            env.dedup();

            let requests: Vec<Value> = profile
                .requests
                .iter()
                .map(|r| {
                    json!({
                        "name": r.name,
                        "method": r.method.to_string(),
                        "path": r.path,
                        "params": r.params(),
                        "description": r.description,
                    })
                })
                .collect();

            profiles.push(json!({
                "name": profile.name,
                "title": profile.title,
                "description": profile.description,
                "auth": auth.get("type").cloned().unwrap_or(Value::Null),
                "env": env,
                "requests": requests,
            }));
        }

        self.output(&Value::Array(profiles))
    }

    /// Validate the profile
    fn validate(&self) -> Result<()> {
        let profile = self.load_profile()?;

        self.output(&json!({
            "profile": profile.name,
            "builtin": is_builtin(&profile.name),
            "valid": true,
            "base_url": profile.base_url,
            "auth": profile.auth_config()?.kind(),
            "requests": profile.requests.len(),
        }))
    }

    /// Print a JSON document to stdout
    fn output(&self, value: &Value) -> Result<()> {
        let text = if self.cli.pretty {
            serde_json::to_string_pretty(value)?
        } else {
            serde_json::to_string(value)?
        };
        println!("{text}");
        Ok(())
    }
}

/// A single-record result prints as that record
fn unwrap_single(mut records: Vec<Value>) -> Value {
    if records.len() == 1 {
        records.remove(0)
    } else {
        Value::Array(records)
    }
}
