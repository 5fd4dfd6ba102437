//! Explicit per-session state: the synchronized catalog list with the active
//! search query, and the encounter list of the entry being viewed.

use std::borrow::Cow;

use crate::catalog_store::{EncounterNote, EntrySummary};
use crate::search::filter_entries;

#[derive(Debug, Clone, Default)]
pub struct CatalogSession {
    entries: Vec<EntrySummary>,
    query: String,
}

impl CatalogSession {
    pub fn new(entries: Vec<EntrySummary>) -> Self {
        Self {
            entries,
            query: String::new(),
        }
    }

    pub fn entries(&self) -> &[EntrySummary] {
        &self.entries
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Entries matching the current query, in catalog order.
    pub fn visible(&self) -> Cow<'_, [EntrySummary]> {
        filter_entries(&self.entries, &self.query)
    }
}

/// Encounter notes of one entry, newest first.
#[derive(Debug, Clone)]
pub struct EncounterLog {
    entry_id: u32,
    notes: Vec<EncounterNote>,
}

impl EncounterLog {
    pub fn new(entry_id: u32, notes: Vec<EncounterNote>) -> Self {
        Self { entry_id, notes }
    }

    pub fn entry_id(&self) -> u32 {
        self.entry_id
    }

    pub fn notes(&self) -> &[EncounterNote] {
        &self.notes
    }

    /// Put a freshly saved note at the top without re-fetching.
    /// Notes for other entries are ignored.
    pub fn prepend(&mut self, note: EncounterNote) {
        if note.entry_id == self.entry_id {
            self.notes.insert(0, note);
        }
    }
}
