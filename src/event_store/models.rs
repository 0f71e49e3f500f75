use serde::{Deserialize, Serialize};

pub type EventId = i64;

/// A catalog event as persisted in the record store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub name: String,
    pub price: f64,
    pub description: String,
    pub event_type: String,
    /// Calendar date, kept as the text the client supplied.
    pub date: String,
}

/// The client-supplied fields of an event. Both front ends build one of
/// these; the store assigns the id.
///
/// Every field is optional on the wire, a missing one takes its zero value
/// and is then subject to validation. An `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EventDraft {
    pub name: String,
    pub price: f64,
    pub description: String,
    pub event_type: String,
    pub date: String,
}

impl EventDraft {
    pub fn into_event(self, id: EventId) -> Event {
        Event {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            event_type: self.event_type,
            date: self.date,
        }
    }
}
