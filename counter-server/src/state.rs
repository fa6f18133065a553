//! Shared application state

use std::sync::Arc;

use shopify_admin::{AdminClient, ClientError, OrdersApi};

use crate::config::Config;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// Upstream client; `None` while required configuration is absent,
    /// in which case every count request answers the configuration error.
    pub shopify: Option<Arc<dyn OrdersApi>>,
}

impl AppState {
    /// Build state from configuration, constructing the real Admin API
    /// client when the required variables are present.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        let shopify = match (&config.shop_domain, &config.access_token) {
            (Some(shop), Some(token)) => {
                let client =
                    AdminClient::new(shop, token, &config.api_version, config.upstream_timeout())?;
                Some(Arc::new(client) as Arc<dyn OrdersApi>)
            }
            _ => None,
        };
        Ok(Self {
            config: Arc::new(config),
            shopify,
        })
    }

    /// State with an injected client (tests)
    pub fn with_client(config: Config, shopify: Arc<dyn OrdersApi>) -> Self {
        Self {
            config: Arc::new(config),
            shopify: Some(shopify),
        }
    }
}
