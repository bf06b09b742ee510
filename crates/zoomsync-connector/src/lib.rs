//! Zoom API connector for zoomsync
//!
//! This crate wraps the Zoom REST API surface the synchronization service
//! needs: Server-to-Server OAuth token acquisition, full-drain paginated
//! listing of users and group members, batched group mutation, and user
//! provisioning for test data.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use zoomsync_connector::{TokenCache, ZoomClient, ZoomConfig, ZoomCredentials};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ZoomConfig::builder()
//!     .account_id("your-account-id")
//!     .build()?;
//!
//! let credentials = ZoomCredentials {
//!     client_id: "your-client-id".to_string(),
//!     client_secret: "your-client-secret".to_string().into(),
//! };
//!
//! let token_cache = Arc::new(TokenCache::new(credentials, &config));
//! let client = ZoomClient::new(token_cache, config)?;
//! let users = client.list_users().await?;
//! # Ok(())
//! # }
//! ```

mod auth;
mod client;
mod config;
mod error;
mod groups;
mod provisioning;
mod users;

// Re-exports
pub use auth::TokenCache;
pub use client::{PageEnvelope, ZoomClient};
pub use config::{
    ZoomConfig, ZoomConfigBuilder, ZoomCredentials, DEFAULT_API_BASE_URL, DEFAULT_PAGE_SIZE,
    DEFAULT_TOKEN_URL,
};
pub use error::{ZoomError, ZoomResult};
pub use groups::GroupMember;
pub use provisioning::{dummy_user_request, CreateUserRequest, CreatedUser, UserInfo};
pub use users::ZoomUser;
