//! Application state.

use std::sync::Arc;

use anyhow::Context;
use tracing::info;

use vgen_models::{Catalog, StyleGroups};
use vgen_provider::RunwayClient;
use vgen_storage::UploadStorage;
use vgen_store::{JsonFileStore, MemoryStore, VideoStore};

use crate::config::ApiConfig;
use crate::services::CompletionSimulator;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub store: Arc<dyn VideoStore>,
    pub uploads: Arc<UploadStorage>,
    pub catalog: Arc<Catalog>,
    pub styles: Arc<StyleGroups>,
    pub simulator: CompletionSimulator,
    /// Upstream generation client; not used by the simulated flow
    pub provider: Arc<RunwayClient>,
}

impl AppState {
    /// Create new application state.
    pub async fn new(config: ApiConfig) -> anyhow::Result<Self> {
        let store: Arc<dyn VideoStore> = match &config.store_path {
            Some(path) => {
                let store = JsonFileStore::open(path)
                    .await
                    .with_context(|| format!("opening store at {}", path.display()))?;
                info!("Using JSON file store at {}", path.display());
                Arc::new(store)
            }
            None => {
                info!("Using in-memory store");
                Arc::new(MemoryStore::new())
            }
        };

        let catalog = match &config.catalog_path {
            Some(path) => {
                let json = tokio::fs::read_to_string(path)
                    .await
                    .with_context(|| format!("reading catalog {}", path.display()))?;
                Catalog::from_json(&json)?
            }
            None => Catalog::builtin(),
        };

        let uploads = UploadStorage::new(config.uploads_dir.clone())
            .await
            .with_context(|| format!("preparing uploads dir {}", config.uploads_dir.display()))?;

        let provider = RunwayClient::from_env()?;

        Ok(Self::from_parts(config, store, uploads, catalog, provider))
    }

    /// Assemble state from already constructed components.
    pub fn from_parts(
        config: ApiConfig,
        store: Arc<dyn VideoStore>,
        uploads: UploadStorage,
        catalog: Catalog,
        provider: RunwayClient,
    ) -> Self {
        let catalog = Arc::new(catalog);
        let simulator =
            CompletionSimulator::new(Arc::clone(&store), Arc::clone(&catalog), config.simulation_delay);

        Self {
            config,
            store,
            uploads: Arc::new(uploads),
            catalog,
            styles: Arc::new(StyleGroups::builtin()),
            simulator,
            provider: Arc::new(provider),
        }
    }
}
