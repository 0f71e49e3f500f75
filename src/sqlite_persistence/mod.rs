mod versioned_schema;

pub use versioned_schema::{
    ensure_schema, read_schema_version, Column, SqlType, Table, VersionedSchema,
};

/// Offset added to every schema version stamped into `PRAGMA user_version`,
/// so a database created by some other tool is never mistaken for ours.
pub const BASE_DB_VERSION: usize = 79000;
