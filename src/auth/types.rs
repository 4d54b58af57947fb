//! Auth configuration and credential types
//!
//! `AuthConfig` is the runtime form of a profile's `auth` section after
//! environment interpolation. `Credential` is what a handshake produces.

use crate::http::RequestConfig;
use crate::types::JsonObject;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Default form field names for session login
pub const DEFAULT_USERNAME_FIELD: &str = "j_username";
/// Default form field names for session login
pub const DEFAULT_PASSWORD_FIELD: &str = "j_password";
/// Default header carrying the anti-forgery token
pub const DEFAULT_XSRF_HEADER: &str = "X-XSRF-TOKEN";

/// How credentials are presented to a token-exchange login endpoint
#[derive(Clone)]
pub enum LoginPayload {
    /// POST with an HTTP Basic `Authorization` header and no body
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },
    /// POST a JSON document (already interpolated with the credentials)
    Json {
        /// Request body
        body: Value,
    },
}

impl std::fmt::Debug for LoginPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginPayload::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            LoginPayload::Json { .. } => f.debug_struct("Json").finish_non_exhaustive(),
        }
    }
}

/// Authentication strategy, selected per profile
#[derive(Clone)]
pub enum AuthConfig {
    /// Pre-shared key placed in a header; no network call
    StaticKey {
        /// Header name (e.g., "X-Cisco-Meraki-API-Key")
        header_name: String,
        /// Prefix to add before the value (e.g., "Bearer ")
        prefix: Option<String>,
        /// The key value
        value: String,
    },

    /// HTTP Basic authentication on every request; no network call
    Basic {
        /// Username
        username: String,
        /// Password
        password: String,
    },

    /// One login POST returning a token in its JSON body
    TokenExchange {
        /// Login endpoint URL
        login_url: String,
        /// How credentials are sent to the login endpoint
        login: LoginPayload,
        /// Path to the token in the login response (e.g., "Token")
        token_path: String,
        /// Header the token is attached under (e.g., "X-Auth-Token")
        header_name: String,
        /// Prefix for the header value (e.g., "APIC-cookie=")
        prefix: Option<String>,
    },

    /// Form login returning a session cookie, then an anti-forgery token fetch
    SessionXsrf {
        /// Form login endpoint URL
        login_url: String,
        /// Anti-forgery token endpoint URL
        token_url: String,
        /// Username
        username: String,
        /// Password
        password: String,
        /// Form field carrying the username
        username_field: String,
        /// Form field carrying the password
        password_field: String,
        /// Cookie to pick from `Set-Cookie` (first cookie when unset)
        cookie_name: Option<String>,
        /// Header carrying the anti-forgery token
        xsrf_header: String,
    },
}

impl AuthConfig {
    /// Static API key in a header
    pub fn static_key(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self::StaticKey {
            header_name: header_name.into(),
            prefix: None,
            value: value.into(),
        }
    }

    /// Bearer token in the `Authorization` header
    pub fn bearer(token: impl Into<String>) -> Self {
        Self::StaticKey {
            header_name: "Authorization".to_string(),
            prefix: Some("Bearer ".to_string()),
            value: token.into(),
        }
    }

    /// HTTP Basic authentication
    pub fn basic(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self::Basic {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Session login plus anti-forgery token, with the default field names
    pub fn session_xsrf(
        login_url: impl Into<String>,
        token_url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self::SessionXsrf {
            login_url: login_url.into(),
            token_url: token_url.into(),
            username: username.into(),
            password: password.into(),
            username_field: DEFAULT_USERNAME_FIELD.to_string(),
            password_field: DEFAULT_PASSWORD_FIELD.to_string(),
            cookie_name: None,
            xsrf_header: DEFAULT_XSRF_HEADER.to_string(),
        }
    }

    /// Short name of the strategy, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            AuthConfig::StaticKey { .. } => "static_key",
            AuthConfig::Basic { .. } => "basic",
            AuthConfig::TokenExchange { .. } => "token_exchange",
            AuthConfig::SessionXsrf { .. } => "session_xsrf",
        }
    }

    /// Number of network round trips the handshake needs
    pub fn round_trips(&self) -> usize {
        match self {
            AuthConfig::StaticKey { .. } | AuthConfig::Basic { .. } => 0,
            AuthConfig::TokenExchange { .. } => 1,
            AuthConfig::SessionXsrf { .. } => 2,
        }
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AuthConfig::StaticKey { header_name, .. } => f
                .debug_struct("StaticKey")
                .field("header_name", header_name)
                .finish_non_exhaustive(),
            AuthConfig::Basic { username, .. } => f
                .debug_struct("Basic")
                .field("username", username)
                .finish_non_exhaustive(),
            AuthConfig::TokenExchange {
                login_url,
                login,
                token_path,
                header_name,
                ..
            } => f
                .debug_struct("TokenExchange")
                .field("login_url", login_url)
                .field("login", login)
                .field("token_path", token_path)
                .field("header_name", header_name)
                .finish_non_exhaustive(),
            AuthConfig::SessionXsrf {
                login_url,
                token_url,
                username,
                xsrf_header,
                ..
            } => f
                .debug_struct("SessionXsrf")
                .field("login_url", login_url)
                .field("token_url", token_url)
                .field("username", username)
                .field("xsrf_header", xsrf_header)
                .finish_non_exhaustive(),
        }
    }
}

/// Credential obtained by a handshake
///
/// Immutable once built: it is only read and attached to outgoing requests.
#[derive(Clone)]
pub struct Credential {
    header_name: String,
    value: String,
    secondary: Option<(String, String)>,
    obtained_at: DateTime<Utc>,
}

impl Credential {
    /// Credential presented under a single header
    pub fn new(header_name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            header_name: header_name.into(),
            value: value.into(),
            secondary: None,
            obtained_at: Utc::now(),
        }
    }

    /// Credential with a secondary (anti-forgery) header
    pub fn with_secondary(
        header_name: impl Into<String>,
        value: impl Into<String>,
        secondary_name: impl Into<String>,
        secondary_value: impl Into<String>,
    ) -> Self {
        Self {
            secondary: Some((secondary_name.into(), secondary_value.into())),
            ..Self::new(header_name, value)
        }
    }

    /// Primary header name
    pub fn header_name(&self) -> &str {
        &self.header_name
    }

    /// Primary header value
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Secondary header, if the handshake produced one
    pub fn secondary(&self) -> Option<(&str, &str)> {
        self.secondary
            .as_ref()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }

    /// When the handshake completed
    pub fn obtained_at(&self) -> DateTime<Utc> {
        self.obtained_at
    }

    /// All headers this credential contributes, primary first
    pub fn headers(&self) -> Vec<(&str, &str)> {
        let mut headers = vec![(self.header_name.as_str(), self.value.as_str())];
        headers.extend(self.secondary());
        headers
    }

    /// Merge the credential headers into a request
    pub fn apply(&self, config: RequestConfig) -> RequestConfig {
        config.headers(self.headers())
    }

    /// JSON summary with secret values masked
    pub fn redacted(&self) -> Value {
        let headers: JsonObject = self
            .headers()
            .into_iter()
            .map(|(name, value)| (name.to_string(), Value::String(redact(value))))
            .collect();

        json!({
            "headers": headers,
            "obtained_at": self.obtained_at.to_rfc3339(),
        })
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("header_name", &self.header_name)
            .field("value", &redact(&self.value))
            .field(
                "secondary",
                &self
                    .secondary
                    .as_ref()
                    .map(|(name, value)| (name, redact(value))),
            )
            .field("obtained_at", &self.obtained_at)
            .finish()
    }
}

/// Mask a secret, keeping a short prefix when the value is long enough
fn redact(value: &str) -> String {
    const VISIBLE: usize = 4;
    if value.chars().count() <= VISIBLE * 2 {
        return "****".to_string();
    }
    let head: String = value.chars().take(VISIBLE).collect();
    format!("{head}****")
}
