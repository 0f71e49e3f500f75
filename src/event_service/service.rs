//! The event service: the only entry point both front ends use.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use thiserror::Error;
use tracing::{debug, error, info};

use super::cache::EventCache;
use super::validation::{parse_event_id, validate_draft, ValidationError};
use crate::event_store::{Event, EventDraft, EventId, EventStore, StorageError};

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Validates input and keeps the record store and the cache aligned.
///
/// The store is always called without holding the cache lock; the cache is
/// only touched once the store call has returned successfully.
///
/// Mutations are serialized by `mutation_lock`, held from the store call
/// until the cache has been updated, so two writes never apply their cache
/// changes in a different order than their store changes.
pub struct EventService {
    store: Arc<dyn EventStore>,
    cache: EventCache,
    mutation_lock: Mutex<()>,
}

impl EventService {
    pub fn new(store: Arc<dyn EventStore>) -> Self {
        Self {
            store,
            cache: EventCache::new(),
            mutation_lock: Mutex::new(()),
        }
    }

    // Guards no data, a panic in another writer leaves nothing to repair.
    fn lock_mutations(&self) -> MutexGuard<'_, ()> {
        self.mutation_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Reads every event from the store and refreshes the cache with them.
    pub fn list_events(&self) -> ServiceResult<Vec<Event>> {
        let generation = self.cache.generation();
        let events = self.store.list_all().map_err(|err| {
            error!("Failed to list events: {}", err);
            err
        })?;

        if !self.cache.replace_if_current(events.clone(), generation) {
            debug!("Event listing raced with a mutation, cache left as is");
        }
        Ok(events)
    }

    pub fn create_event(&self, draft: EventDraft) -> ServiceResult<Event> {
        validate_draft(&draft)?;

        let _guard = self.lock_mutations();
        let id = self.store.insert(&draft).map_err(|err| {
            error!("Failed to create event '{}': {}", draft.name, err);
            err
        })?;

        let event = draft.into_event(id);
        info!("Created event {} '{}'", event.id, event.name);
        self.cache.upsert(event.clone());
        Ok(event)
    }

    /// Replaces the fields of event `id`. An id with no matching record is
    /// not an error and creates nothing.
    pub fn update_event(&self, id: &str, draft: EventDraft) -> ServiceResult<()> {
        let id = parse_event_id(id)?;
        validate_draft(&draft)?;

        let _guard = self.lock_mutations();
        let matched = self.store.update(id, &draft).map_err(|err| {
            error!("Failed to update event {}: {}", id, err);
            err
        })?;

        if matched {
            info!("Updated event {}", id);
            self.cache.upsert(draft.into_event(id));
        } else {
            debug!("Update of event {} matched no record", id);
            self.cache.remove(id);
        }
        Ok(())
    }

    /// Removes event `id`. Deleting an id that does not exist succeeds.
    pub fn delete_event(&self, id: &str) -> ServiceResult<()> {
        let id = parse_event_id(id)?;

        let _guard = self.lock_mutations();
        let matched = self.store.delete(id).map_err(|err| {
            error!("Failed to delete event {}: {}", id, err);
            err
        })?;

        if matched {
            info!("Deleted event {}", id);
        } else {
            debug!("Delete of event {} matched no record", id);
        }
        self.cache.remove(id);
        Ok(())
    }

    /// Events as of the last synchronization. May be stale or partial.
    pub fn cached_events(&self) -> Vec<Event> {
        self.cache.snapshot()
    }

    pub fn cached_event(&self, id: EventId) -> Option<Event> {
        self.cache.get(id)
    }

    pub fn cached_events_count(&self) -> usize {
        self.cache.len()
    }
}
