//! Configuration types for profile definitions
//!
//! A profile describes one vendor API: where it lives, how to authenticate,
//! how it paginates, and the named requests the demonstrations issue. The
//! YAML shapes here are converted into the runtime configs the `auth`,
//! `http` and `pagination` modules consume.

use crate::auth::{
    AuthConfig, LoginPayload, DEFAULT_PASSWORD_FIELD, DEFAULT_USERNAME_FIELD, DEFAULT_XSRF_HEADER,
};
use crate::error::{Error, Result};
use crate::http::{join_url, HttpClientConfig};
use crate::pagination::{FetchLimits, FetchRequest, PaginationConfig, DEFAULT_MAX_PAGES};
use crate::template;
use crate::types::{Method, StringMap};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Top-Level Profile
// ============================================================================

/// Complete profile loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    /// Unique profile name (e.g., "sdwan")
    pub name: String,

    /// Human-readable title (e.g., "Cisco SD-WAN vManage")
    #[serde(default)]
    pub title: Option<String>,

    /// Description of the profile
    #[serde(default)]
    pub description: Option<String>,

    /// Base URL for API requests
    pub base_url: String,

    /// Authentication configuration
    pub auth: AuthDefinition,

    /// HTTP client configuration
    #[serde(default)]
    pub http: HttpDefinition,

    /// Pagination configuration
    #[serde(default)]
    pub pagination: PaginationDefinition,

    /// Named requests
    #[serde(default)]
    pub requests: Vec<RequestDefinition>,
}

impl Profile {
    /// Join a path onto the base URL; absolute URLs pass through
    pub fn resolve_url(&self, path: &str) -> String {
        join_url(&self.base_url, path)
    }

    /// Runtime auth strategy
    pub fn auth_config(&self) -> Result<AuthConfig> {
        let config = match &self.auth {
            AuthDefinition::StaticKey {
                header,
                prefix,
                value,
            } => AuthConfig::StaticKey {
                header_name: header.clone(),
                prefix: prefix.clone(),
                value: value.clone(),
            },

            AuthDefinition::Bearer { token } => AuthConfig::bearer(token),

            AuthDefinition::Basic { username, password } => AuthConfig::basic(username, password),

            AuthDefinition::TokenExchange {
                login_url,
                login,
                token_path,
                header,
                prefix,
            } => AuthConfig::TokenExchange {
                login_url: self.resolve_url(login_url),
                login: match login {
                    LoginDefinition::Basic { username, password } => LoginPayload::Basic {
                        username: username.clone(),
                        password: password.clone(),
                    },
                    LoginDefinition::Json { body } => LoginPayload::Json { body: body.clone() },
                },
                token_path: token_path.clone(),
                header_name: header.clone(),
                prefix: prefix.clone(),
            },

            AuthDefinition::SessionXsrf {
                login_url,
                token_url,
                username,
                password,
                username_field,
                password_field,
                cookie_name,
                xsrf_header,
            } => AuthConfig::SessionXsrf {
                login_url: self.resolve_url(login_url),
                token_url: self.resolve_url(token_url),
                username: username.clone(),
                password: password.clone(),
                username_field: username_field.clone(),
                password_field: password_field.clone(),
                cookie_name: cookie_name.clone(),
                xsrf_header: xsrf_header.clone(),
            },
        };
        Ok(config)
    }

    /// Runtime HTTP client config
    pub fn http_config(&self) -> HttpClientConfig {
        let mut builder = HttpClientConfig::builder()
            .base_url(&self.base_url)
            .timeout(Duration::from_secs(self.http.timeout_secs))
            .accept_invalid_certs(self.http.accept_invalid_certs);

        if let Some(agent) = &self.http.user_agent {
            builder = builder.user_agent(agent);
        }
        for (key, value) in &self.http.headers {
            builder = builder.header(key, value);
        }
        builder.build()
    }

    /// Runtime pagination strategy
    pub fn pagination_config(&self) -> Result<PaginationConfig> {
        let def = &self.pagination;
        match def.kind {
            PaginationKind::None => Ok(PaginationConfig::None),
            PaginationKind::LinkHeader => Ok(PaginationConfig::link_header(&def.rel)),
            PaginationKind::NextUrl => def
                .path
                .as_deref()
                .map(PaginationConfig::next_url)
                .ok_or_else(|| Error::missing_field("pagination.path")),
        }
    }

    /// Page ceiling and deadline for fetches
    pub fn fetch_limits(&self) -> FetchLimits {
        let limits = FetchLimits::default().max_pages(self.pagination.max_pages);
        match self.pagination.deadline_secs {
            Some(secs) => limits.deadline(Duration::from_secs(secs)),
            None => limits,
        }
    }

    /// Look up a named request
    pub fn request(&self, name: &str) -> Result<&RequestDefinition> {
        self.requests.iter().find(|r| r.name == name).ok_or_else(|| {
            let known: Vec<&str> = self.requests.iter().map(|r| r.name.as_str()).collect();
            Error::config(format!(
                "Profile '{}' has no request '{name}'. Known requests: {}",
                self.name,
                known.join(", ")
            ))
        })
    }

    /// Records path for a request: its own, else the profile's
    pub fn records_path<'a>(&'a self, request: Option<&'a RequestDefinition>) -> Option<&'a str> {
        request
            .and_then(|r| r.records_path.as_deref())
            .or(self.pagination.records_path.as_deref())
    }

    /// Check the profile for problems that would only surface mid-run
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(Error::config("Profile name cannot be empty"));
        }

        url::Url::parse(&self.base_url).map_err(|e| Error::invalid_url(&self.base_url, e))?;

        if self.http.timeout_secs == 0 {
            return Err(Error::invalid_value("http.timeout_secs", "must be greater than 0"));
        }

        if self.pagination.max_pages == 0 {
            return Err(Error::invalid_value("pagination.max_pages", "must be greater than 0"));
        }

        if self.pagination.deadline_secs == Some(0) {
            return Err(Error::invalid_value(
                "pagination.deadline_secs",
                "must be greater than 0",
            ));
        }

        self.pagination_config()?;
        self.auth.validate()?;

        let mut seen = std::collections::HashSet::new();
        for request in &self.requests {
            if !seen.insert(request.name.as_str()) {
                return Err(Error::config(format!(
                    "Duplicate request name '{}'",
                    request.name
                )));
            }
            if request.path.trim().is_empty() {
                return Err(Error::missing_field(format!("requests.{}.path", request.name)));
            }
        }

        Ok(())
    }
}

// ============================================================================
// Auth Definitions
// ============================================================================

/// Authentication configuration in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AuthDefinition {
    /// Pre-shared key in a header
    StaticKey {
        /// Header name
        header: String,
        /// Prefix to add before the value
        #[serde(default)]
        prefix: Option<String>,
        /// The key value (usually `${ENV_VAR}`)
        value: String,
    },

    /// Bearer token in the Authorization header
    Bearer {
        /// The token value
        token: String,
    },

    /// HTTP Basic authentication
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// Login POST returning a token
    TokenExchange {
        /// Login path or URL
        login_url: String,
        /// How credentials are sent
        login: LoginDefinition,
        /// Path to the token in the login response
        token_path: String,
        /// Header the token is attached under
        header: String,
        /// Prefix for the header value
        #[serde(default)]
        prefix: Option<String>,
    },

    /// Form login plus anti-forgery token
    SessionXsrf {
        /// Form login path or URL
        login_url: String,
        /// Anti-forgery token path or URL
        token_url: String,
        /// Username
        username: String,
        /// Password
        password: String,
        /// Form field for the username
        #[serde(default = "default_username_field")]
        username_field: String,
        /// Form field for the password
        #[serde(default = "default_password_field")]
        password_field: String,
        /// Cookie to keep from Set-Cookie
        #[serde(default)]
        cookie_name: Option<String>,
        /// Header for the anti-forgery token
        #[serde(default = "default_xsrf_header")]
        xsrf_header: String,
    },
}

impl AuthDefinition {
    /// Reject empty header names and URLs up front
    fn validate(&self) -> Result<()> {
        let required: Vec<(&str, &str)> = match self {
            AuthDefinition::StaticKey { header, .. } => vec![("auth.header", header.as_str())],
            AuthDefinition::Bearer { .. } | AuthDefinition::Basic { .. } => Vec::new(),
            AuthDefinition::TokenExchange {
                login_url,
                token_path,
                header,
                ..
            } => vec![
                ("auth.login_url", login_url.as_str()),
                ("auth.token_path", token_path.as_str()),
                ("auth.header", header.as_str()),
            ],
            AuthDefinition::SessionXsrf {
                login_url,
                token_url,
                xsrf_header,
                ..
            } => vec![
                ("auth.login_url", login_url.as_str()),
                ("auth.token_url", token_url.as_str()),
                ("auth.xsrf_header", xsrf_header.as_str()),
            ],
        };

        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(Error::missing_field(field));
            }
        }
        Ok(())
    }
}

/// How a token-exchange login presents credentials
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LoginDefinition {
    /// HTTP Basic on the login POST
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// JSON document as the login body
    Json {
        /// Request body
        body: serde_json::Value,
    },
}

fn default_username_field() -> String {
    DEFAULT_USERNAME_FIELD.to_string()
}

fn default_password_field() -> String {
    DEFAULT_PASSWORD_FIELD.to_string()
}

fn default_xsrf_header() -> String {
    DEFAULT_XSRF_HEADER.to_string()
}

// ============================================================================
// HTTP / Pagination Definitions
// ============================================================================

/// HTTP client configuration in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpDefinition {
    /// Per-request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Skip TLS certificate verification
    #[serde(default)]
    pub accept_invalid_certs: bool,

    /// User agent override
    #[serde(default)]
    pub user_agent: Option<String>,

    /// Headers sent with every request
    #[serde(default)]
    pub headers: StringMap,
}

impl Default for HttpDefinition {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout(),
            accept_invalid_certs: false,
            user_agent: None,
            headers: StringMap::new(),
        }
    }
}

fn default_timeout() -> u64 {
    30
}

/// Continuation strategy names
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaginationKind {
    /// Single page
    #[default]
    None,
    /// RFC 5988 Link header
    LinkHeader,
    /// URL in a body field
    NextUrl,
}

/// Pagination configuration in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationDefinition {
    /// Strategy
    #[serde(rename = "type", default)]
    pub kind: PaginationKind,

    /// Link rel to follow
    #[serde(default = "default_rel")]
    pub rel: String,

    /// Body path of the next URL (next_url strategy)
    #[serde(default)]
    pub path: Option<String>,

    /// Path to the records array in each page
    #[serde(default)]
    pub records_path: Option<String>,

    /// Page ceiling
    #[serde(default = "default_max_pages")]
    pub max_pages: u32,

    /// Overall fetch deadline in seconds
    #[serde(default)]
    pub deadline_secs: Option<u64>,
}

impl Default for PaginationDefinition {
    fn default() -> Self {
        Self {
            kind: PaginationKind::None,
            rel: default_rel(),
            path: None,
            records_path: None,
            max_pages: default_max_pages(),
            deadline_secs: None,
        }
    }
}

fn default_rel() -> String {
    "next".to_string()
}

fn default_max_pages() -> u32 {
    DEFAULT_MAX_PAGES
}

// ============================================================================
// Request Definitions
// ============================================================================

/// A named request in YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestDefinition {
    /// Request name (e.g., "devices")
    pub name: String,

    /// What the request does
    #[serde(default)]
    pub description: Option<String>,

    /// HTTP method
    #[serde(default)]
    pub method: Method,

    /// Path relative to the base URL; may hold `{param}` placeholders
    pub path: String,

    /// Query parameters for the first request
    #[serde(default)]
    pub query: StringMap,

    /// Extra headers for this request
    #[serde(default)]
    pub headers: StringMap,

    /// JSON body
    #[serde(default)]
    pub body: Option<serde_json::Value>,

    /// Records path override
    #[serde(default)]
    pub records_path: Option<String>,
}

impl RequestDefinition {
    /// Parameters this request needs, from its path and query values
    pub fn params(&self) -> Vec<String> {
        let mut params = template::path_params(&self.path);
        for value in self.query.values() {
            for name in template::path_params(value) {
                if !params.contains(&name) {
                    params.push(name);
                }
            }
        }
        params
    }

    /// Build the fetch request, substituting `{param}` placeholders
    pub fn to_fetch_request(&self, params: &HashMap<String, String>) -> Result<FetchRequest> {
        let path = template::render_path(&self.path, params)?;
        let mut request = FetchRequest::new(self.method, path);
        for (key, value) in &self.query {
            request
                .query
                .insert(key.clone(), template::render_path(value, params)?);
        }
        request.headers = self.headers.clone();
        request.body = self.body.clone();
        Ok(request)
    }
}
