//! SQLite schema definitions for the events database.

use crate::sqlite_column;
use crate::sqlite_persistence::{Column, SqlType, Table, VersionedSchema};

// =============================================================================
// Version 1 - Events table
// =============================================================================

/// AUTOINCREMENT keeps SQLite from handing out the id of a deleted row again.
const EVENTOS_TABLE_V1: Table = Table {
    name: "eventos",
    columns: &[
        sqlite_column!(
            "id",
            &SqlType::Integer,
            is_primary_key = true,
            is_autoincrement = true
        ),
        sqlite_column!("name", &SqlType::Text, non_null = true),
        sqlite_column!("price", &SqlType::Real, non_null = true),
        sqlite_column!("description", &SqlType::Text, non_null = true),
        sqlite_column!("event_type", &SqlType::Text, non_null = true),
        sqlite_column!("date", &SqlType::Text, non_null = true),
    ],
    indices: &[("idx_eventos_date", "date")],
};

// =============================================================================
// Versioned Schema Definition
// =============================================================================

pub const EVENTS_VERSIONED_SCHEMAS: &[VersionedSchema] = &[VersionedSchema {
    version: 1,
    tables: &[EVENTOS_TABLE_V1],
    migration: None,
}];
