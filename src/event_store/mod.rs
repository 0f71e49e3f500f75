mod error;
mod models;
mod schema;
mod sqlite_event_store;

pub use error::StorageError;
pub use models::{Event, EventDraft, EventId};
pub use schema::EVENTS_VERSIONED_SCHEMAS;
pub use sqlite_event_store::SqliteEventStore;

pub type StorageResult<T> = Result<T, StorageError>;

/// Durable record store for events, the sole source of truth.
///
/// Every method maps to a single statement, so each call is atomic on its
/// own. Calls may block on the database for as long as the backend allows.
pub trait EventStore: Send + Sync {
    /// Full scan, ordered by id.
    fn list_all(&self) -> StorageResult<Vec<Event>>;

    /// Persists a new row and returns the id the store assigned to it.
    fn insert(&self, draft: &EventDraft) -> StorageResult<EventId>;

    /// Replaces every mutable field of the row with the given id.
    /// Returns `false` when no row matched, which is not an error.
    fn update(&self, id: EventId, draft: &EventDraft) -> StorageResult<bool>;

    /// Removes the row with the given id.
    /// Returns `false` when no row matched, which is not an error.
    fn delete(&self, id: EventId) -> StorageResult<bool>;
}
