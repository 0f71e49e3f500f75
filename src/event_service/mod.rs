mod cache;
mod service;
mod validation;

pub use cache::EventCache;
pub use service::{EventService, ServiceError, ServiceResult};
pub use validation::{parse_event_id, validate_draft, ValidationError, ValidationResult};
