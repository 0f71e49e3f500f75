//! Process-local mirror of the record store.

use crate::event_store::{Event, EventId};
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
struct CacheState {
    events: BTreeMap<EventId, Event>,
    /// Bumped by every single-entry write, lets a full listing detect that
    /// it raced with a mutation.
    generation: u64,
}

/// Advisory cache of the most recently seen events.
///
/// Every read returns owned copies, the lock is never exposed. Callers that
/// need fresh data must list the record store instead.
#[derive(Default)]
pub struct EventCache {
    state: Mutex<CacheState>,
}

impl EventCache {
    pub fn new() -> Self {
        Self::default()
    }

    // The map is always left consistent between statements, so a panic in
    // another holder does not invalidate it.
    fn state(&self) -> MutexGuard<'_, CacheState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn generation(&self) -> u64 {
        self.state().generation
    }

    /// Overwrites the whole cache.
    pub fn replace(&self, events: Vec<Event>) {
        let mut state = self.state();
        state.events = events.into_iter().map(|e| (e.id, e)).collect();
    }

    /// Overwrites the whole cache unless a single-entry write happened since
    /// `generation` was read. Returns whether the cache was replaced.
    pub fn replace_if_current(&self, events: Vec<Event>, generation: u64) -> bool {
        let mut state = self.state();
        if state.generation != generation {
            return false;
        }
        state.events = events.into_iter().map(|e| (e.id, e)).collect();
        true
    }

    pub fn upsert(&self, event: Event) {
        let mut state = self.state();
        state.generation += 1;
        state.events.insert(event.id, event);
    }

    pub fn remove(&self, id: EventId) -> Option<Event> {
        let mut state = self.state();
        state.generation += 1;
        state.events.remove(&id)
    }

    pub fn get(&self, id: EventId) -> Option<Event> {
        self.state().events.get(&id).cloned()
    }

    /// Owned copies of every cached event, ordered by id.
    pub fn snapshot(&self) -> Vec<Event> {
        self.state().events.values().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.state().events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state().events.is_empty()
    }
}
