use super::schema::EVENTS_VERSIONED_SCHEMAS;
use super::{Event, EventDraft, EventId, EventStore, StorageError, StorageResult};
use crate::sqlite_persistence::ensure_schema;
use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::{debug, info};

#[derive(Debug)]
pub struct SqliteEventStore {
    conn: Mutex<Connection>,
}

impl SqliteEventStore {
    /// Opens the events database at `db_path`, creating or migrating it as
    /// needed. `busy_timeout` bounds how long a statement waits on a locked
    /// database before failing.
    pub fn new<P: AsRef<Path>>(db_path: P, busy_timeout: Duration) -> Result<Self> {
        let path = db_path.as_ref();
        if path.exists() {
            info!("Opening events database at {:?}", path);
        } else {
            info!("Creating new events database at {:?}", path);
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open events database at {:?}", path))?;
        Self::from_connection(conn, busy_timeout)
    }

    /// A private, non-persistent database. Useful for tests.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn, Duration::from_secs(5))
    }

    fn from_connection(mut conn: Connection, busy_timeout: Duration) -> Result<Self> {
        conn.busy_timeout(busy_timeout)?;
        ensure_schema(&mut conn, EVENTS_VERSIONED_SCHEMAS)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> StorageResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StorageError::Unavailable("database connection lock poisoned".into()))
    }

    fn row_to_event(row: &rusqlite::Row) -> rusqlite::Result<Event> {
        Ok(Event {
            id: row.get("id")?,
            name: row.get("name")?,
            price: row.get("price")?,
            description: row.get("description")?,
            event_type: row.get("event_type")?,
            date: row.get("date")?,
        })
    }
}

impl EventStore for SqliteEventStore {
    fn list_all(&self) -> StorageResult<Vec<Event>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare_cached(
            "SELECT id, name, price, description, event_type, date FROM eventos ORDER BY id",
        )?;
        let events = stmt
            .query_map([], Self::row_to_event)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        debug!("Listed {} events", events.len());
        Ok(events)
    }

    fn insert(&self, draft: &EventDraft) -> StorageResult<EventId> {
        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO eventos (name, price, description, event_type, date)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                draft.name,
                draft.price,
                draft.description,
                draft.event_type,
                draft.date
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    fn update(&self, id: EventId, draft: &EventDraft) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute(
            "UPDATE eventos SET name = ?1, price = ?2, description = ?3, event_type = ?4, date = ?5
             WHERE id = ?6",
            params![
                draft.name,
                draft.price,
                draft.description,
                draft.event_type,
                draft.date,
                id
            ],
        )?;
        Ok(changed > 0)
    }

    fn delete(&self, id: EventId) -> StorageResult<bool> {
        let conn = self.conn()?;
        let changed = conn.execute("DELETE FROM eventos WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }
}
