//! Shared application state

use std::sync::Arc;

use imagevault_gateway::{ObjectStoreProvider, S3StoreProvider, StorageGateway};

use crate::config::ServerConfig;

/// State shared across all request handlers
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<StorageGateway>,
    pub config: ServerConfig,
}

impl AppState {
    /// Build the state with an S3 store provider from the configuration.
    pub fn new(config: &ServerConfig) -> Self {
        let provider = Arc::new(S3StoreProvider::new(config.storage.clone()));
        Self::with_provider(config, provider)
    }

    /// Build the state around an explicit store provider.
    pub fn with_provider(config: &ServerConfig, provider: Arc<dyn ObjectStoreProvider>) -> Self {
        let gateway = Arc::new(StorageGateway::new(config.storage.clone(), provider));
        Self {
            gateway,
            config: config.clone(),
        }
    }
}
