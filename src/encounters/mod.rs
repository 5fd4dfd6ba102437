//! Encounter notes attached to catalog entries.

use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

use crate::catalog_store::{CatalogStore, EncounterLocation, EncounterNote, NewEncounterNote};

#[derive(Debug, Error)]
pub enum EncounterError {
    /// Rejected before reaching the store.
    #[error("Please write a description for the encounter")]
    EmptyDescription,

    #[error("Could not save the encounter: {0:#}")]
    Store(anyhow::Error),
}

/// Service for creating and listing encounter notes.
pub struct EncounterService {
    store: Arc<dyn CatalogStore>,
    default_location: EncounterLocation,
}

impl EncounterService {
    pub fn new(store: Arc<dyn CatalogStore>, default_location: EncounterLocation) -> Self {
        Self {
            store,
            default_location,
        }
    }

    /// Save a note for `entry_id` and return the stored row.
    ///
    /// The description is trimmed; a blank one is rejected without touching
    /// the store. Without an explicit location the configured default is used.
    pub async fn add_encounter(
        &self,
        entry_id: u32,
        description: &str,
        location: Option<EncounterLocation>,
    ) -> Result<EncounterNote, EncounterError> {
        let description = description.trim();
        if description.is_empty() {
            debug!("Rejected blank encounter for entry {}", entry_id);
            return Err(EncounterError::EmptyDescription);
        }

        let location = location.unwrap_or_else(|| self.default_location.clone());
        let new_note = NewEncounterNote::new(entry_id, description.to_string(), location);

        let saved = self
            .store
            .insert_note(&new_note)
            .await
            .map_err(EncounterError::Store)?;

        info!("Saved encounter {} for entry {}", saved.id, entry_id);
        Ok(saved)
    }

    /// Notes for `entry_id`, newest first.
    pub async fn list_encounters(&self, entry_id: u32) -> anyhow::Result<Vec<EncounterNote>> {
        self.store.list_notes(entry_id).await
    }
}
