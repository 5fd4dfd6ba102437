//! Application context: the store and source handles every operation shares.

use anyhow::Result;
use std::sync::Arc;
use tracing::info;

use crate::catalog_store::{CatalogEntry, CatalogStore, RestCatalogStore, SqliteCatalogStore};
use crate::config::{AppConfig, StoreSettings};
use crate::creature_source::{CreatureSource, PokeApiClient};
use crate::encounters::EncounterService;
use crate::session::{CatalogSession, EncounterLog};
use crate::sync::{CatalogSynchronizer, SyncError};

pub struct AppContext {
    store: Arc<dyn CatalogStore>,
    source: Arc<dyn CreatureSource>,
    config: AppConfig,
}

impl AppContext {
    pub fn new(
        store: Arc<dyn CatalogStore>,
        source: Arc<dyn CreatureSource>,
        config: AppConfig,
    ) -> Self {
        Self {
            store,
            source,
            config,
        }
    }

    /// Build the configured store backend and the creature API client.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let store: Arc<dyn CatalogStore> = match &config.store {
            StoreSettings::Sqlite { db_path } => {
                info!("Opening SQLite catalog database at {:?}...", db_path);
                Arc::new(SqliteCatalogStore::new(db_path)?)
            }
            StoreSettings::Rest { url, api_key } => {
                info!("Using hosted catalog store at {}", url);
                Arc::new(RestCatalogStore::new(
                    url,
                    api_key,
                    config.request_timeout_sec,
                )?)
            }
        };
        let source: Arc<dyn CreatureSource> = Arc::new(PokeApiClient::new(
            &config.source_url,
            config.request_timeout_sec,
        )?);
        Ok(Self::new(store, source, config))
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    pub fn synchronizer(&self) -> CatalogSynchronizer {
        CatalogSynchronizer::with_expected_size(
            self.store.clone(),
            self.source.clone(),
            self.config.expected_catalog_size,
        )
    }

    pub fn encounters(&self) -> EncounterService {
        EncounterService::new(self.store.clone(), self.config.default_location.clone())
    }

    /// Synchronize and wrap the result in a fresh session.
    pub async fn start_session(&self) -> Result<CatalogSession, SyncError> {
        let outcome = self.synchronizer().synchronize().await?;
        Ok(CatalogSession::new(outcome.entries))
    }

    /// Everything the detail view shows: the entry and its encounters.
    pub async fn load_entry(&self, id: u32) -> Result<Option<(CatalogEntry, EncounterLog)>> {
        let Some(entry) = self.store.get_entry(id).await? else {
            return Ok(None);
        };
        let notes = self.encounters().list_encounters(id).await?;
        Ok(Some((entry, EncounterLog::new(id, notes))))
    }
}
