//! SQLite schema definitions for the local catalog database.
//!
//! List-valued entry attributes (types, abilities, stats) are stored as JSON
//! text, mirroring the JSON columns of the hosted store.

use crate::sqlite_column;
use crate::sqlite_persistence::{
    Column, ForeignKey, ForeignKeyOnChange, SqlType, Table, VersionedSchema,
};

const ENTRIES_TABLE: Table = Table {
    name: "entries",
    columns: &[
        sqlite_column!("id", &SqlType::Integer, is_primary_key = true),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("height", &SqlType::Integer),
        sqlite_column!("weight", &SqlType::Integer),
        sqlite_column!("types", &SqlType::Text, non_null = true, default_value = Some("'[]'")),
        sqlite_column!(
            "abilities",
            &SqlType::Text,
            non_null = true,
            default_value = Some("'[]'")
        ),
        sqlite_column!("stats", &SqlType::Text, non_null = true, default_value = Some("'[]'")),
        sqlite_column!("sprite_default", &SqlType::Text),
        sqlite_column!("sprite_official", &SqlType::Text),
    ],
    indices: &[("idx_entries_name", "name")],
};

const ENTRY_FK: ForeignKey = ForeignKey {
    foreign_table: "entries",
    foreign_column: "id",
    on_delete: ForeignKeyOnChange::Restrict,
};

const NOTES_TABLE: Table = Table {
    name: "notes",
    columns: &[
        sqlite_column!("id", &SqlType::Text, is_primary_key = true), // uuid v4
        sqlite_column!("created_at", &SqlType::Text, non_null = true), // RFC 3339, microseconds
        sqlite_column!(
            "entry_id",
            &SqlType::Integer,
            non_null = true,
            foreign_key = Some(&ENTRY_FK)
        ),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("location", &SqlType::Text),
        sqlite_column!("latitude", &SqlType::Real),
        sqlite_column!("longitude", &SqlType::Real),
    ],
    indices: &[("idx_notes_entry", "entry_id")],
};

pub const CATALOG_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 0,
    tables: &[ENTRIES_TABLE, NOTES_TABLE],
    migration: None,
}];
