//! CatalogStore trait definition.
//!
//! This trait abstracts the remote data store so the synchronizer and the
//! encounter service work the same against the hosted REST store and the
//! local SQLite store.

use anyhow::Result;
use async_trait::async_trait;

use super::models::{CatalogEntry, EncounterNote, EntrySummary, NewEncounterNote};

/// Trait for catalog storage backends.
#[async_trait]
pub trait CatalogStore: Send + Sync {
    // =========================================================================
    // Catalog entries
    // =========================================================================

    /// Number of rows in the entries table.
    async fn count_entries(&self) -> Result<usize>;

    /// Insert-or-overwrite every entry, keyed by id. Never deletes rows.
    async fn upsert_entries(&self, entries: &[CatalogEntry]) -> Result<()>;

    /// All entries as `{id, name}`, ordered by id ascending.
    async fn list_entry_summaries(&self) -> Result<Vec<EntrySummary>>;

    /// Full record for one entry.
    async fn get_entry(&self, id: u32) -> Result<Option<CatalogEntry>>;

    // =========================================================================
    // Encounter notes
    // =========================================================================

    /// Insert one note and return the stored row, including the
    /// store-assigned id and timestamp.
    async fn insert_note(&self, note: &NewEncounterNote) -> Result<EncounterNote>;

    /// Notes attached to an entry, newest first.
    async fn list_notes(&self, entry_id: u32) -> Result<Vec<EncounterNote>>;
}
