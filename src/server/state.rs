use crate::event_service::EventService;
use std::sync::Arc;
use std::time::Instant;

use super::ServerConfig;

pub type GuardedEventService = Arc<EventService>;

#[derive(Clone)]
pub struct ServerState {
    pub config: ServerConfig,
    pub start_time: Instant,
    pub event_service: GuardedEventService,
    pub hash: String,
}
