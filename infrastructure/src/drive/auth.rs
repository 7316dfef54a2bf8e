//! OAuth access tokens from a refresh token.
//!
//! [`TokenProvider`] exchanges the configured refresh token for an access
//! token and caches it until shortly before it expires. Concurrent callers
//! share one refresh: the cache lock is held across the exchange.

use gdrive_application::{Credentials, GatewayError};
use serde::Deserialize;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// Tokens are refreshed this long before the provider says they expire
const EXPIRY_MARGIN: Duration = Duration::from_secs(60);

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

struct CachedToken {
    access_token: String,
    expires_at: Instant,
}

/// Lazily refreshed bearer token for one set of credentials
pub struct TokenProvider {
    http: reqwest::Client,
    token_url: String,
    credentials: Credentials,
    cache: Mutex<Option<CachedToken>>,
}

impl TokenProvider {
    pub fn new(
        http: reqwest::Client,
        token_url: impl Into<String>,
        credentials: Credentials,
    ) -> Self {
        Self {
            http,
            token_url: token_url.into(),
            credentials,
            cache: Mutex::new(None),
        }
    }

    /// A valid access token, refreshing it when absent or about to expire
    pub async fn access_token(&self) -> Result<String, GatewayError> {
        let mut cache = self.cache.lock().await;
        if let Some(cached) = cache.as_ref()
            && Instant::now() < cached.expires_at
        {
            return Ok(cached.access_token.clone());
        }

        let fresh = self.refresh().await?;
        let token = fresh.access_token.clone();
        *cache = Some(fresh);
        Ok(token)
    }

    /// Forget the cached token so the next call refreshes
    pub async fn invalidate(&self) {
        *self.cache.lock().await = None;
    }

    async fn refresh(&self) -> Result<CachedToken, GatewayError> {
        let missing = self.credentials.missing();
        if !missing.is_empty() {
            return Err(GatewayError::Auth(format!(
                "missing credentials: {}",
                missing.join(", ")
            )));
        }

        let params = [
            ("grant_type", "refresh_token"),
            ("client_id", self.credentials.client_id.as_deref().unwrap_or_default()),
            (
                "client_secret",
                self.credentials.client_secret.as_deref().unwrap_or_default(),
            ),
            (
                "refresh_token",
                self.credentials.refresh_token.as_deref().unwrap_or_default(),
            ),
        ];

        debug!("Refreshing access token");
        let response = self
            .http
            .post(&self.token_url)
            .form(&params)
            .send()
            .await
            .map_err(|e| GatewayError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
                Ok(err) => err.error_description.unwrap_or(err.error),
                Err(_) => format!("HTTP {}", status),
            };
            return Err(GatewayError::Auth(message));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| GatewayError::Auth(format!("invalid token response: {}", e)))?;
        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));

        Ok(CachedToken {
            access_token: token.access_token,
            expires_at: Instant::now() + lifetime.saturating_sub(EXPIRY_MARGIN),
        })
    }
}
