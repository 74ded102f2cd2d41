use std::sync::Arc;

use anyhow::{Context, Result};
use fleet_shared::FleetDataStore;

use crate::{config::ServerConfig, markdown};

#[derive(Clone)]
pub struct AppState {
    /// Immutable catalog; shared by every handler without locking
    store: Arc<FleetDataStore>,
}

impl AppState {
    pub async fn new(config: &ServerConfig) -> Result<Self> {
        let store = match &config.content_dir {
            Some(dir) => {
                tracing::info!("Content directory: {}", dir.display());
                markdown::load_content_dir(dir)
                    .await
                    .with_context(|| format!("failed to load content from {}", dir.display()))?
            },
            None => {
                tracing::info!("Using bundled fleet and blog data");
                FleetDataStore::bundled()?
            },
        };
        Ok(Self::from_store(store))
    }

    pub fn from_store(store: FleetDataStore) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &FleetDataStore {
        &self.store
    }

    pub fn car_count(&self) -> usize {
        self.store.cars().len()
    }

    pub fn post_count(&self) -> usize {
        self.store.posts().len()
    }
}
