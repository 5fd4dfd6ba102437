//! Catalog synchronization.
//!
//! Seeds the store's entries table from the creature API when it holds fewer
//! rows than the expected catalog size, then reads the catalog back in id
//! order. Runs once per session; nothing here retries.

use futures::future::try_join_all;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

use crate::catalog_store::{CatalogEntry, CatalogStore, EntrySummary};
use crate::creature_source::CreatureSource;

/// Number of entries in the reference catalog.
pub const EXPECTED_CATALOG_SIZE: usize = 151;

/// Errors that end a synchronization attempt. The display text is meant to
/// be shown to the user as-is.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Could not fetch the creature list: {0:#}")]
    Listing(anyhow::Error),

    #[error("Could not fetch details for {name}: {reason:#}")]
    Detail { name: String, reason: anyhow::Error },

    #[error("Could not save the catalog: {0:#}")]
    Upsert(anyhow::Error),

    #[error("Could not load the catalog: {0:#}")]
    ReadBack(anyhow::Error),
}

/// Result of a successful synchronization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncOutcome {
    /// Every stored entry, ordered by id ascending.
    pub entries: Vec<EntrySummary>,
    /// Whether the store was (re)populated from the creature API.
    pub populated: bool,
}

pub struct CatalogSynchronizer {
    store: Arc<dyn CatalogStore>,
    source: Arc<dyn CreatureSource>,
    expected_size: usize,
}

impl CatalogSynchronizer {
    pub fn new(store: Arc<dyn CatalogStore>, source: Arc<dyn CreatureSource>) -> Self {
        Self::with_expected_size(store, source, EXPECTED_CATALOG_SIZE)
    }

    pub fn with_expected_size(
        store: Arc<dyn CatalogStore>,
        source: Arc<dyn CreatureSource>,
        expected_size: usize,
    ) -> Self {
        Self {
            store,
            source,
            expected_size,
        }
    }

    pub async fn synchronize(&self) -> Result<SyncOutcome, SyncError> {
        let populated = if self.needs_population().await {
            self.populate().await?;
            true
        } else {
            false
        };

        let entries = self
            .store
            .list_entry_summaries()
            .await
            .map_err(SyncError::ReadBack)?;

        info!(
            "Catalog ready with {} entries (populated: {})",
            entries.len(),
            populated
        );
        Ok(SyncOutcome { entries, populated })
    }

    /// A failed count is treated as an empty table so a transient read error
    /// cannot block first-time population.
    async fn needs_population(&self) -> bool {
        match self.store.count_entries().await {
            Ok(count) if count >= self.expected_size => {
                info!("Catalog already has {} entries, skipping population", count);
                false
            }
            Ok(count) => {
                info!(
                    "Catalog has {} of {} entries, populating",
                    count, self.expected_size
                );
                true
            }
            Err(e) => {
                warn!("Failed to count catalog entries, populating anyway: {:#}", e);
                true
            }
        }
    }

    async fn populate(&self) -> Result<(), SyncError> {
        let listing = self
            .source
            .fetch_listing(self.expected_size)
            .await
            .map_err(SyncError::Listing)?;

        // All detail requests go out together; the first failure aborts the lot.
        let details = try_join_all(listing.iter().map(|item| async move {
            self.source
                .fetch_detail(item)
                .await
                .map_err(|reason| SyncError::Detail {
                    name: item.name.clone(),
                    reason,
                })
        }))
        .await?;

        let entries: Vec<CatalogEntry> = details.into_iter().map(CatalogEntry::from).collect();
        self.store
            .upsert_entries(&entries)
            .await
            .map_err(SyncError::Upsert)?;

        info!("Stored {} catalog entries", entries.len());
        Ok(())
    }
}
