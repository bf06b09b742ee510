//! OAuth token acquisition for the Zoom API.
//!
//! Zoom Server-to-Server OAuth apps exchange client credentials for a bearer
//! token using the `account_credentials` grant with HTTP Basic authentication.

use chrono::{DateTime, Duration, Utc};
use secrecy::ExposeSecret;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use crate::{ZoomConfig, ZoomCredentials, ZoomError, ZoomResult};

/// OAuth token response from the Zoom token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: i64,
    #[allow(dead_code)]
    token_type: String,
}

/// Cached OAuth access token.
#[derive(Debug, Clone)]
struct CachedToken {
    access_token: String,
    expires_at: DateTime<Utc>,
}

impl CachedToken {
    /// Returns true if the token is expired or will expire within the grace period.
    fn is_expired(&self, grace_period: Duration) -> bool {
        Utc::now() + grace_period >= self.expires_at
    }
}

/// Token cache for managing Zoom OAuth access tokens.
#[derive(Debug)]
pub struct TokenCache {
    credentials: ZoomCredentials,
    token_url: String,
    account_id: String,
    http_client: reqwest::Client,
    cached_token: Arc<RwLock<Option<CachedToken>>>,
    /// Grace period before expiry to trigger refresh (default: 5 minutes).
    grace_period: Duration,
}

impl TokenCache {
    /// Creates a new token cache.
    pub fn new(credentials: ZoomCredentials, config: &ZoomConfig) -> Self {
        Self {
            credentials,
            token_url: config.token_url.clone(),
            account_id: config.account_id.clone(),
            http_client: reqwest::Client::new(),
            cached_token: Arc::new(RwLock::new(None)),
            grace_period: Duration::minutes(5),
        }
    }

    /// Gets a valid access token, refreshing if necessary.
    #[instrument(skip(self), fields(account_id = %self.account_id))]
    pub async fn get_token(&self) -> ZoomResult<String> {
        {
            let cache = self.cached_token.read().await;
            if let Some(ref token) = *cache {
                if !token.is_expired(self.grace_period) {
                    debug!("Using cached token");
                    return Ok(token.access_token.clone());
                }
            }
        }

        debug!("Refreshing access token");
        let new_token = self.acquire_token().await?;

        {
            let mut cache = self.cached_token.write().await;
            *cache = Some(new_token.clone());
        }

        Ok(new_token.access_token)
    }

    /// Acquires a new access token using the account credentials grant.
    #[instrument(skip(self))]
    async fn acquire_token(&self) -> ZoomResult<CachedToken> {
        let params = [
            ("grant_type", "account_credentials"),
            ("account_id", &self.account_id),
        ];

        let response = self
            .http_client
            .post(&self.token_url)
            .basic_auth(
                &self.credentials.client_id,
                Some(self.credentials.client_secret.expose_secret()),
            )
            .form(&params)
            .send()
            .await
            .map_err(|e| ZoomError::Auth(format!("Token request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(ZoomError::Auth(format!(
                "Token request failed with status {status}: {body}"
            )));
        }

        let token_response: TokenResponse = response
            .json()
            .await
            .map_err(|e| ZoomError::Auth(format!("Failed to parse token response: {e}")))?;

        let expires_at = Utc::now() + Duration::seconds(token_response.expires_in);

        debug!(%expires_at, "Acquired new token");

        Ok(CachedToken {
            access_token: token_response.access_token,
            expires_at,
        })
    }

    /// Invalidates the cached token, forcing a refresh on next use.
    pub async fn invalidate(&self) {
        let mut cache = self.cached_token.write().await;
        *cache = None;
    }
}
