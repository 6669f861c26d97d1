//! Firebase Authentication over its REST API.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use clause_core::{ClauseError, Result, Session};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::provider::{provider_message, IdentityProvider};

pub const DEFAULT_IDENTITY_URL: &str = "https://identitytoolkit.googleapis.com/v1";
pub const DEFAULT_TOKEN_URL: &str = "https://securetoken.googleapis.com/v1";

/// Connection settings for a Firebase project.
#[derive(Debug, Clone)]
pub struct FirebaseConfig {
    /// Web API key of the project.
    pub api_key: String,

    /// Base URL of the Identity Toolkit API.
    pub identity_url: String,

    /// Base URL of the Secure Token API.
    pub token_url: String,
}

impl FirebaseConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            identity_url: DEFAULT_IDENTITY_URL.to_string(),
            token_url: DEFAULT_TOKEN_URL.to_string(),
        }
    }

    /// Point both APIs at another host (emulator or test stub).
    pub fn with_urls(mut self, identity_url: &str, token_url: &str) -> Self {
        self.identity_url = identity_url.trim_end_matches('/').to_string();
        self.token_url = token_url.trim_end_matches('/').to_string();
        self
    }
}

/// Identity provider backed by Firebase Authentication.
#[derive(Clone)]
pub struct FirebaseIdentityProvider {
    config: FirebaseConfig,
    http_client: reqwest::Client,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct PasswordRequest<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthResponse {
    local_id: String,
    email: String,
    #[serde(default)]
    display_name: Option<String>,
    id_token: String,
    refresh_token: String,
    expires_in: String,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    id_token: String,
    refresh_token: String,
    expires_in: String,
    user_id: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: String,
}

impl FirebaseIdentityProvider {
    pub fn new(config: FirebaseConfig) -> Self {
        Self {
            config,
            http_client: reqwest::Client::new(),
        }
    }

    async fn password_call(&self, method: &str, email: &str, password: &str) -> Result<Session> {
        let url = format!("{}/accounts:{}", self.config.identity_url, method);
        debug!("Calling identity provider {}", method);

        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&PasswordRequest {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| ClauseError::Provider(e.to_string()))?;

        let body: AuthResponse = parse_response(response).await?;
        Ok(Session {
            uid: body.local_id,
            email: body.email,
            display_name: body.display_name.filter(|name| !name.is_empty()),
            id_token: body.id_token,
            refresh_token: Some(body.refresh_token),
            expires_at: Some(expiry_from(&body.expires_in)?),
        })
    }
}

/// Turn a provider response into `T`, or into the provider's error message.
async fn parse_response<T: serde::de::DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    let bytes = response
        .bytes()
        .await
        .map_err(|e| ClauseError::Provider(e.to_string()))?;

    if !status.is_success() {
        let message = match serde_json::from_slice::<ErrorEnvelope>(&bytes) {
            Ok(envelope) => provider_message(&envelope.error.message),
            Err(_) => format!(
                "Firebase: {}.",
                status.canonical_reason().unwrap_or("request failed")
            ),
        };
        warn!(status = status.as_u16(), "Identity provider rejected request");
        return Err(ClauseError::Provider(message));
    }

    Ok(serde_json::from_slice(&bytes)?)
}

fn expiry_from(expires_in: &str) -> Result<chrono::DateTime<Utc>> {
    let seconds: i64 = expires_in
        .trim()
        .parse()
        .map_err(|_| ClauseError::Payload(format!("Invalid token lifetime: {}", expires_in)))?;
    Ok(Utc::now() + Duration::seconds(seconds))
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn create_account(&self, email: &str, password: &str) -> Result<Session> {
        self.password_call("signUp", email, password).await
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<Session> {
        self.password_call("signInWithPassword", email, password).await
    }

    async fn sign_out(&self, _session: &Session) -> Result<()> {
        // ID tokens are stateless; signing out only forgets them locally.
        Ok(())
    }

    async fn refresh(&self, session: &Session) -> Result<Session> {
        let refresh_token = session
            .refresh_token
            .as_deref()
            .ok_or_else(|| ClauseError::Provider(provider_message("INVALID_REFRESH_TOKEN")))?;

        let url = format!("{}/token", self.config.token_url);
        let response = self
            .http_client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .form(&[("grant_type", "refresh_token"), ("refresh_token", refresh_token)])
            .send()
            .await
            .map_err(|e| ClauseError::Provider(e.to_string()))?;

        let body: TokenResponse = parse_response(response).await?;
        Ok(Session {
            uid: body.user_id,
            email: session.email.clone(),
            display_name: session.display_name.clone(),
            id_token: body.id_token,
            refresh_token: Some(body.refresh_token),
            expires_at: Some(expiry_from(&body.expires_in)?),
        })
    }
}
