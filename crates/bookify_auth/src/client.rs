// --- File: crates/bookify_auth/src/client.rs ---
//! Client for the hosted identity provider.
//!
//! Login is the only operation the booking client needs: it exchanges
//! email/password credentials for a bearer token. Everything else about the
//! provider (token contents, refresh, storage security) is its own concern.

use bookify_common::http::HTTP_CLIENT;
use bookify_config::AuthConfig;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

// --- Error Handling ---
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("identity provider request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("login failed: {0}")]
    Credentials(String),
    #[error("failed to parse identity provider response: {0}")]
    Parse(String),
    #[error("session storage error: {0}")]
    Storage(#[from] std::io::Error),
}

/// Tokens returned on a successful login.
#[derive(Debug, Clone)]
pub struct LoginTokens {
    pub access_token: String,
    pub id_token: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    client_id: Option<&'a str>,
}

#[derive(Deserialize, Default)]
struct LoginData {
    access_token: Option<String>,
    id_token: Option<String>,
}

#[derive(Deserialize)]
struct LoginResponse {
    #[serde(default)]
    data: Option<LoginData>,
    #[serde(default)]
    errors: Vec<LoginErrorEntry>,
}

#[derive(Deserialize)]
struct LoginErrorEntry {
    message: Option<String>,
}

/// Client for the identity provider's login endpoint.
pub struct AuthClient {
    client: Client,
    config: AuthConfig,
}

impl AuthClient {
    pub fn new(config: AuthConfig) -> Self {
        Self {
            client: HTTP_CLIENT.clone(),
            config,
        }
    }

    /// Exchange credentials for session tokens.
    ///
    /// Any entry in the provider's `errors` array, or a response without an
    /// access token, is treated as a credential failure.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginTokens, AuthError> {
        let url = format!(
            "{}/api/login",
            self.config.provider_url.trim_end_matches('/')
        );
        let request = LoginRequest {
            email,
            password,
            client_id: self.config.client_id.as_deref(),
        };

        debug!("Logging in against identity provider at {}", url);
        let response = self.client.post(&url).json(&request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Identity provider returned status {}", status);
            return Err(AuthError::Credentials(format!(
                "provider returned status {status}"
            )));
        }

        parse_login_response(&body)
    }
}

/// Interprets a login response body.
pub(crate) fn parse_login_response(body: &str) -> Result<LoginTokens, AuthError> {
    let parsed: LoginResponse = serde_json::from_str(body)
        .map_err(|err| AuthError::Parse(err.to_string()))?;

    if let Some(entry) = parsed.errors.into_iter().next() {
        let message = entry
            .message
            .unwrap_or_else(|| "check credentials".to_string());
        return Err(AuthError::Credentials(message));
    }

    let data = parsed.data.unwrap_or_default();
    match data.access_token {
        Some(access_token) => Ok(LoginTokens {
            access_token,
            id_token: data.id_token,
        }),
        None => Err(AuthError::Credentials(
            "provider returned no access token".to_string(),
        )),
    }
}
