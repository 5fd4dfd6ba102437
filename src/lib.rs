//! PokeCounter catalog library
//!
//! Keeps a store of catalog entries seeded from the public creature API,
//! filters the in-memory list by name and records encounter notes.

pub mod app;
pub mod catalog_store;
pub mod config;
pub mod creature_source;
pub mod encounters;
pub mod search;
pub mod session;
pub mod sqlite_persistence;
pub mod sync;

// Re-export commonly used types for convenience
pub use app::AppContext;
pub use catalog_store::{CatalogEntry, CatalogStore, EncounterNote, EntrySummary};
pub use search::filter_entries;
pub use sync::{CatalogSynchronizer, SyncError, SyncOutcome};
