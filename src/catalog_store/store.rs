//! SQLite-backed catalog store.
//!
//! Stands in for the hosted store during development and in tests. Upserts
//! run in a single transaction, so unlike the hosted store a failed upsert
//! leaves the table untouched.

use super::models::*;
use super::schema::CATALOG_VERSIONED_SCHEMAS;
use super::trait_def::CatalogStore;
use crate::sqlite_persistence::open_versioned;
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::{debug, info};

#[derive(Clone)]
pub struct SqliteCatalogStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteCatalogStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let path = db_path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open catalog database at {:?}", path))?;
        Self::from_connection(conn)
    }

    pub fn in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(mut conn: Connection) -> Result<Self> {
        conn.execute("PRAGMA foreign_keys = ON;", [])?;
        open_versioned(&mut conn, CATALOG_VERSIONED_SCHEMAS)
            .context("Failed to prepare catalog schema")?;

        let entry_count: i64 = conn
            .query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))
            .unwrap_or(0);
        info!("Opened catalog database: {} entries", entry_count);

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow::anyhow!("Catalog database lock poisoned"))
    }

    fn row_to_entry(row: &rusqlite::Row) -> rusqlite::Result<CatalogEntry> {
        Ok(CatalogEntry {
            id: row.get("id")?,
            name: row.get("name")?,
            height: row.get("height")?,
            weight: row.get("weight")?,
            types: json_column(row, "types")?,
            abilities: json_column(row, "abilities")?,
            stats: json_column(row, "stats")?,
            sprite_default: row.get("sprite_default")?,
            sprite_official: row.get("sprite_official")?,
        })
    }

    fn row_to_note(row: &rusqlite::Row) -> rusqlite::Result<EncounterNote> {
        let created_at_str: String = row.get("created_at")?;
        let created_at = DateTime::parse_from_rfc3339(&created_at_str)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|e| {
                rusqlite::Error::FromSqlConversionFailure(
                    1,
                    rusqlite::types::Type::Text,
                    Box::new(e),
                )
            })?;

        Ok(EncounterNote {
            id: row.get("id")?,
            created_at,
            entry_id: row.get("entry_id")?,
            description: row.get("description")?,
            location: row.get("location")?,
            latitude: row.get("latitude")?,
            longitude: row.get("longitude")?,
        })
    }
}

fn json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row,
    column: &str,
) -> rusqlite::Result<T> {
    let raw: String = row.get(column)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Fixed-width timestamps keep lexical order equal to chronological order.
fn format_timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

#[async_trait]
impl CatalogStore for SqliteCatalogStore {
    async fn count_entries(&self) -> Result<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM entries", [], |r| r.get(0))?;
        Ok(count as usize)
    }

    async fn upsert_entries(&self, entries: &[CatalogEntry]) -> Result<()> {
        let mut conn = self.lock()?;
        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO entries
                    (id, name, height, weight, types, abilities, stats, sprite_default, sprite_official)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    height = excluded.height,
                    weight = excluded.weight,
                    types = excluded.types,
                    abilities = excluded.abilities,
                    stats = excluded.stats,
                    sprite_default = excluded.sprite_default,
                    sprite_official = excluded.sprite_official",
            )?;
            for entry in entries {
                stmt.execute(params![
                    entry.id,
                    entry.name,
                    entry.height,
                    entry.weight,
                    serde_json::to_string(&entry.types)?,
                    serde_json::to_string(&entry.abilities)?,
                    serde_json::to_string(&entry.stats)?,
                    entry.sprite_default,
                    entry.sprite_official,
                ])
                .with_context(|| format!("Failed to upsert entry {}", entry.id))?;
            }
        }
        tx.commit()?;
        debug!("Upserted {} entries", entries.len());
        Ok(())
    }

    async fn list_entry_summaries(&self) -> Result<Vec<EntrySummary>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT id, name FROM entries ORDER BY id ASC")?;
        let summaries = stmt
            .query_map([], |row| {
                Ok(EntrySummary {
                    id: row.get(0)?,
                    name: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(summaries)
    }

    async fn get_entry(&self, id: u32) -> Result<Option<CatalogEntry>> {
        let conn = self.lock()?;
        let entry = conn
            .query_row(
                "SELECT * FROM entries WHERE id = ?1",
                params![id],
                Self::row_to_entry,
            )
            .optional()?;
        Ok(entry)
    }

    async fn insert_note(&self, note: &NewEncounterNote) -> Result<EncounterNote> {
        let conn = self.lock()?;
        let saved = EncounterNote {
            id: uuid::Uuid::new_v4().to_string(),
            created_at: Utc::now(),
            entry_id: note.entry_id,
            description: note.description.clone(),
            location: note.location.clone(),
            latitude: note.latitude,
            longitude: note.longitude,
        };

        conn.execute(
            "INSERT INTO notes (id, created_at, entry_id, description, location, latitude, longitude)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                saved.id,
                format_timestamp(&saved.created_at),
                saved.entry_id,
                saved.description,
                saved.location,
                saved.latitude,
                saved.longitude,
            ],
        )
        .with_context(|| format!("Failed to insert note for entry {}", note.entry_id))?;

        // Echo the stored row so the caller sees exactly what was persisted.
        let stored = conn.query_row(
            "SELECT * FROM notes WHERE id = ?1",
            params![saved.id],
            Self::row_to_note,
        )?;
        Ok(stored)
    }

    async fn list_notes(&self, entry_id: u32) -> Result<Vec<EncounterNote>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            "SELECT * FROM notes WHERE entry_id = ?1 ORDER BY created_at DESC, rowid DESC",
        )?;
        let notes = stmt
            .query_map(params![entry_id], Self::row_to_note)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(notes)
    }
}
