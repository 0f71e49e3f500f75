//! Eventos Server Library
//!
//! This library exposes the internal modules for testing and potential reuse.

pub mod config;
pub mod console;
pub mod event_service;
pub mod event_store;
pub mod server;
pub mod sqlite_persistence;

// Re-export commonly used types for convenience
pub use event_service::{EventCache, EventService, ServiceError, ValidationError};
pub use event_store::{Event, EventDraft, EventId, EventStore, SqliteEventStore, StorageError};
pub use server::{run_server, RequestsLoggingLevel};
