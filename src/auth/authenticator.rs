//! Authenticator implementation
//!
//! Runs the vendor handshake selected by an [`AuthConfig`] and returns the
//! resulting [`Credential`]. One attempt per run; there is no refresh.

use super::types::{AuthConfig, Credential, LoginPayload};
use crate::decode::{extract_path, looks_like_html};
use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpResponse, RequestConfig};
use crate::types::OptionStringExt;
use async_trait::async_trait;
use base64::Engine as _;
use serde_json::Value;
use tracing::{debug, info};

/// Anything that can produce a credential for a run
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Perform the handshake and return the credential
    async fn authenticate(&self) -> Result<Credential>;
}

/// Authenticator dispatches to the handshake for its configured strategy
pub struct Authenticator {
    /// Auth configuration
    config: AuthConfig,
    /// HTTP client for handshake requests
    http_client: HttpClient,
}

impl Authenticator {
    /// Create a new authenticator with a default HTTP client
    pub fn new(config: AuthConfig) -> Result<Self> {
        Ok(Self {
            config,
            http_client: HttpClient::new()?,
        })
    }

    /// Create an authenticator sharing an existing HTTP client
    pub fn with_client(config: AuthConfig, http_client: HttpClient) -> Self {
        Self {
            config,
            http_client,
        }
    }

    /// Get the current auth config
    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// POST credentials and read a token out of the JSON reply
    async fn exchange_token(
        &self,
        login_url: &str,
        login: &LoginPayload,
        token_path: &str,
        header_name: &str,
        prefix: Option<&str>,
    ) -> Result<Credential> {
        let request = match login {
            LoginPayload::Basic { username, password } => {
                RequestConfig::new().basic_auth(username, password)
            }
            LoginPayload::Json { body } => RequestConfig::new().json(body.clone()),
        };

        let response = self.http_client.post(login_url, request).await?;
        let response = check_handshake_response(response, "Login")?;

        let body: Value = serde_json::from_str(&response.body).map_err(|e| {
            Error::auth(format!("Login response from {} is not JSON: {e}", response.url))
        })?;

        let token = extract_path(&body, token_path)
            .and_then(scalar_to_string)
            .none_if_empty()
            .ok_or_else(|| {
                Error::auth(format!(
                    "Could not extract token from path '{token_path}' in login response"
                ))
            })?;

        info!("Obtained token from {}", response.url);
        Ok(Credential::new(
            header_name,
            format!("{}{token}", prefix.unwrap_or("")),
        ))
    }

    /// Form login for a session cookie, then fetch the anti-forgery token
    #[allow(clippy::too_many_arguments)]
    async fn session_with_xsrf(
        &self,
        login_url: &str,
        token_url: &str,
        username: &str,
        password: &str,
        username_field: &str,
        password_field: &str,
        cookie_name: Option<&str>,
        xsrf_header: &str,
    ) -> Result<Credential> {
        let login =
            RequestConfig::new().form([(username_field, username), (password_field, password)]);
        let response = self.http_client.post(login_url, login).await?;
        let response = check_handshake_response(response, "Login")?;

        let session = session_cookie(&response, cookie_name).ok_or_else(|| {
            Error::auth(format!(
                "Login response from {} carried no session cookie in Set-Cookie",
                response.url
            ))
        })?;
        debug!("Session cookie obtained from {}", response.url);

        // The anti-forgery token is the body of the token endpoint, not of the login reply.
        let token_request = RequestConfig::new().header("Cookie", session.as_str());
        let token_response = self.http_client.get(token_url, token_request).await?;
        let token_response = check_handshake_response(token_response, "Token")?;

        let xsrf = token_response
            .body
            .trim()
            .to_string()
            .none_if_empty()
            .ok_or_else(|| {
                Error::auth(format!(
                    "Token endpoint {} returned an empty anti-forgery token",
                    token_response.url
                ))
            })?;

        info!("Session established with {}", response.url);
        Ok(Credential::with_secondary("Cookie", session, xsrf_header, xsrf))
    }
}

#[async_trait]
impl TokenProvider for Authenticator {
    async fn authenticate(&self) -> Result<Credential> {
        debug!(
            "Authenticating with {} strategy ({} round trips)",
            self.config.kind(),
            self.config.round_trips()
        );

        match &self.config {
            AuthConfig::StaticKey {
                header_name,
                prefix,
                value,
            } => {
                if value.trim().is_empty() {
                    return Err(Error::auth(format!("API key for '{header_name}' is empty")));
                }
                Ok(Credential::new(
                    header_name,
                    format!("{}{value}", prefix.as_deref().unwrap_or("")),
                ))
            }

            AuthConfig::Basic { username, password } => {
                if username.is_empty() {
                    return Err(Error::auth("Basic auth username is empty"));
                }
                let encoded = base64::engine::general_purpose::STANDARD
                    .encode(format!("{username}:{password}"));
                Ok(Credential::new("Authorization", format!("Basic {encoded}")))
            }

            AuthConfig::TokenExchange {
                login_url,
                login,
                token_path,
                header_name,
                prefix,
            } => {
                self.exchange_token(
                    login_url,
                    login,
                    token_path,
                    header_name,
                    prefix.as_deref(),
                )
                .await
            }

            AuthConfig::SessionXsrf {
                login_url,
                token_url,
                username,
                password,
                username_field,
                password_field,
                cookie_name,
                xsrf_header,
            } => {
                self.session_with_xsrf(
                    login_url,
                    token_url,
                    username,
                    password,
                    username_field,
                    password_field,
                    cookie_name.as_deref(),
                    xsrf_header,
                )
                .await
            }
        }
    }
}

/// Reject non-success statuses and HTML error pages from a handshake step
fn check_handshake_response(response: HttpResponse, step: &str) -> Result<HttpResponse> {
    if !response.is_success() {
        return Err(Error::auth(format!(
            "{step} request to {} failed with status {}: {}",
            response.url,
            response.status.as_u16(),
            response.body
        )));
    }

    if looks_like_html(&response.body) {
        return Err(Error::unexpected_content(response.url, &response.body));
    }

    Ok(response)
}

/// Pick the session cookie (`name=value`, attributes dropped) out of `Set-Cookie`
fn session_cookie(response: &HttpResponse, cookie_name: Option<&str>) -> Option<String> {
    response
        .headers
        .get_all("set-cookie")
        .iter()
        .filter_map(|v| v.to_str().ok())
        .filter_map(|raw| raw.split(';').next())
        .map(str::trim)
        .filter(|pair| pair.contains('=') && !pair.ends_with('='))
        .find(|pair| match cookie_name {
            Some(name) => pair.split('=').next() == Some(name),
            None => true,
        })
        .map(String::from)
}

/// Render a scalar JSON value as a token string
fn scalar_to_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
