//! Validation for events and event identifiers.
//!
//! Both front ends go through these checks before anything reaches the
//! record store.

use crate::event_store::{EventDraft, EventId};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Field '{field}' is required but was empty")]
    EmptyField { field: &'static str },

    #[error("Field '{field}' must be non-negative, got {value}")]
    NegativeValue { field: &'static str, value: f64 },

    #[error("Field '{field}' must be a finite number")]
    NonFiniteValue { field: &'static str },

    #[error("Event id not specified")]
    MissingId,

    #[error("Invalid event id '{0}'")]
    InvalidId(String),
}

pub type ValidationResult<T> = Result<T, ValidationError>;

pub fn validate_draft(draft: &EventDraft) -> ValidationResult<()> {
    if draft.name.trim().is_empty() {
        return Err(ValidationError::EmptyField { field: "name" });
    }
    if !draft.price.is_finite() {
        return Err(ValidationError::NonFiniteValue { field: "price" });
    }
    if draft.price < 0.0 {
        return Err(ValidationError::NegativeValue {
            field: "price",
            value: draft.price,
        });
    }
    Ok(())
}

/// Parses an identifier as typed by a user or taken from a request path.
pub fn parse_event_id(raw: &str) -> ValidationResult<EventId> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(ValidationError::MissingId);
    }
    raw.parse::<EventId>()
        .map_err(|_| ValidationError::InvalidId(raw.to_string()))
}
