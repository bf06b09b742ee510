//! Connector configuration and credentials.

use secrecy::SecretString;

use crate::{ZoomError, ZoomResult};

/// Default Zoom REST API base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.zoom.us/v2";

/// Default Zoom OAuth token endpoint.
pub const DEFAULT_TOKEN_URL: &str = "https://zoom.us/oauth/token";

/// Default page size for list endpoints.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// OAuth Server-to-Server credentials.
#[derive(Debug, Clone)]
pub struct ZoomCredentials {
    /// OAuth client ID.
    pub client_id: String,
    /// OAuth client secret.
    pub client_secret: SecretString,
}

/// Zoom connector configuration.
#[derive(Debug, Clone)]
pub struct ZoomConfig {
    /// REST API base URL (no trailing slash).
    pub api_base_url: String,
    /// OAuth token endpoint URL.
    pub token_url: String,
    /// Zoom account ID for the `account_credentials` grant.
    pub account_id: String,
    /// Page size used on paginated list endpoints.
    pub page_size: u32,
}

impl ZoomConfig {
    /// Creates a builder with production endpoint defaults.
    #[must_use]
    pub fn builder() -> ZoomConfigBuilder {
        ZoomConfigBuilder::default()
    }
}

/// Builder for [`ZoomConfig`].
#[derive(Debug, Default)]
pub struct ZoomConfigBuilder {
    api_base_url: Option<String>,
    token_url: Option<String>,
    account_id: Option<String>,
    page_size: Option<u32>,
}

impl ZoomConfigBuilder {
    /// Sets the REST API base URL.
    #[must_use]
    pub fn api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = Some(url.into());
        self
    }

    /// Sets the OAuth token endpoint URL.
    #[must_use]
    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    /// Sets the account ID (required).
    #[must_use]
    pub fn account_id(mut self, id: impl Into<String>) -> Self {
        self.account_id = Some(id.into());
        self
    }

    /// Sets the list page size.
    #[must_use]
    pub fn page_size(mut self, size: u32) -> Self {
        self.page_size = Some(size);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ZoomError::Config` if the account ID is missing or the page
    /// size is zero.
    pub fn build(self) -> ZoomResult<ZoomConfig> {
        let account_id = self
            .account_id
            .ok_or_else(|| ZoomError::Config("account_id is required".into()))?;

        let page_size = self.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
        if page_size == 0 {
            return Err(ZoomError::Config("page_size must be at least 1".into()));
        }

        Ok(ZoomConfig {
            api_base_url: self
                .api_base_url
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            token_url: self
                .token_url
                .unwrap_or_else(|| DEFAULT_TOKEN_URL.to_string()),
            account_id,
            page_size,
        })
    }
}
