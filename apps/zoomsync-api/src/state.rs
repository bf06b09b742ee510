//! Shared application state.

use std::sync::Arc;

use zoomsync_connector::{TokenCache, ZoomClient, ZoomConfig, ZoomCredentials, ZoomResult};
use zoomsync_reconcile::{ReconcileConfig, Reconciler};

use crate::config::Config;

/// State shared by all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Zoom API client.
    pub client: Arc<ZoomClient>,
    /// Group reconciler.
    pub reconciler: Arc<Reconciler>,
}

impl AppState {
    /// Wires the connector and reconciler from application configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn from_config(config: &Config) -> ZoomResult<Self> {
        let zoom_config = ZoomConfig::builder()
            .account_id(&config.account_id)
            .api_base_url(&config.api_base_url)
            .token_url(&config.token_url)
            .page_size(config.page_size)
            .build()?;

        let credentials = ZoomCredentials {
            client_id: config.client_id.clone(),
            client_secret: config.client_secret.clone(),
        };

        let token_cache = Arc::new(TokenCache::new(credentials, &zoom_config));
        let client = Arc::new(ZoomClient::new(token_cache, zoom_config)?);

        let reconciler = Arc::new(Reconciler::new(
            client.clone(),
            ReconcileConfig::new(&config.target_group_id, config.exempt_group_ids.clone())
                .with_batch_size(config.batch_size),
        ));

        Ok(Self { client, reconciler })
    }
}
