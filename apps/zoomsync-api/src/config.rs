//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading with validation: required variables must be present and
//! valid, or the application exits with a clear error message.

use secrecy::SecretString;
use std::env;
use thiserror::Error;

/// Zoom caps list page sizes at 300.
const MAX_PAGE_SIZE: u32 = 300;

/// Configuration errors that can occur during environment loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Application configuration loaded from environment variables.
#[derive(Clone)]
pub struct Config {
    /// OAuth client ID for the Server-to-Server app.
    pub client_id: String,

    /// OAuth client secret.
    pub client_secret: SecretString,

    /// Zoom account ID for the account credentials grant.
    pub account_id: String,

    /// Zoom REST API base URL.
    pub api_base_url: String,

    /// Zoom OAuth token endpoint URL.
    pub token_url: String,

    /// The group kept in sync.
    pub target_group_id: String,

    /// Groups whose members are excluded from the target group.
    pub exempt_group_ids: Vec<String>,

    /// Page size for paginated list calls.
    pub page_size: u32,

    /// Maximum members per add-members call.
    pub batch_size: usize,

    /// Tracing filter directive (e.g., "info,zoomsync=debug").
    pub rust_log: String,

    /// Server bind address.
    pub host: String,

    /// Server listen port.
    pub port: u16,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"[redacted]")
            .field("account_id", &self.account_id)
            .field("api_base_url", &self.api_base_url)
            .field("target_group_id", &self.target_group_id)
            .field("exempt_group_ids", &self.exempt_group_ids)
            .field("host", &self.host)
            .field("port", &self.port)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values are
    /// invalid.
    ///
    /// # Required Variables
    ///
    /// - `ZOOM_CLIENT_ID` / `ZOOM_CLIENT_SECRET` / `ZOOM_ACCOUNT_ID`
    /// - `TARGET_GROUP_ID` - the group kept in sync
    /// - `EXEMPT_GROUP_IDS` - comma-separated, at least one
    ///
    /// # Optional Variables
    ///
    /// - `ZOOM_API_BASE_URL` (default: production API)
    /// - `ZOOM_TOKEN_URL` (default: production token endpoint)
    /// - `PAGE_SIZE` (default: 30, max 300)
    /// - `BATCH_SIZE` (default: 30)
    /// - `RUST_LOG` (default: "info")
    /// - `HOST` (default: "0.0.0.0") / `PORT` (default: 8080)
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let client_id = require_var("ZOOM_CLIENT_ID")?;
        let client_secret = SecretString::new(require_var("ZOOM_CLIENT_SECRET")?);
        let account_id = require_var("ZOOM_ACCOUNT_ID")?;
        let target_group_id = require_var("TARGET_GROUP_ID")?;

        let exempt_group_ids = parse_group_list(&require_var("EXEMPT_GROUP_IDS")?);
        if exempt_group_ids.is_empty() {
            return Err(ConfigError::InvalidValue {
                var: "EXEMPT_GROUP_IDS".to_string(),
                message: "Must list at least one group ID".to_string(),
            });
        }
        if exempt_group_ids.contains(&target_group_id) {
            return Err(ConfigError::InvalidValue {
                var: "EXEMPT_GROUP_IDS".to_string(),
                message: "Must not contain the target group".to_string(),
            });
        }

        let api_base_url = env::var("ZOOM_API_BASE_URL")
            .unwrap_or_else(|_| zoomsync_connector::DEFAULT_API_BASE_URL.to_string());
        let token_url = env::var("ZOOM_TOKEN_URL")
            .unwrap_or_else(|_| zoomsync_connector::DEFAULT_TOKEN_URL.to_string());

        let page_size: u32 = parse_var("PAGE_SIZE", zoomsync_connector::DEFAULT_PAGE_SIZE)?;
        if page_size == 0 || page_size > MAX_PAGE_SIZE {
            return Err(ConfigError::InvalidValue {
                var: "PAGE_SIZE".to_string(),
                message: format!("Must be between 1 and {MAX_PAGE_SIZE}"),
            });
        }

        let batch_size: usize = parse_var("BATCH_SIZE", zoomsync_reconcile::DEFAULT_BATCH_SIZE)?;
        if batch_size == 0 {
            return Err(ConfigError::InvalidValue {
                var: "BATCH_SIZE".to_string(),
                message: "Must be at least 1".to_string(),
            });
        }

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());
        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        Ok(Config {
            client_id,
            client_secret,
            account_id,
            api_base_url,
            token_url,
            target_group_id,
            exempt_group_ids,
            page_size,
            batch_size,
            rust_log,
            host,
            port,
        })
    }

    /// Get the server bind address as a socket address string.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn require_var(name: &str) -> Result<String, ConfigError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name.to_string())),
    }
}

fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value.parse().map_err(|_| ConfigError::InvalidValue {
            var: name.to_string(),
            message: format!("Could not parse '{value}'"),
        }),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated group list, trimming whitespace and dropping
/// empty entries.
fn parse_group_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
