//! Shared constants for end-to-end tests

use serde_json::{json, Value};

// ============================================================================
// Server Timing
// ============================================================================

/// Maximum time to wait for server to become ready (milliseconds)
pub const SERVER_READY_TIMEOUT_MS: u64 = 5000;

/// Timeout for individual HTTP requests (seconds)
pub const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Polling interval when waiting for server ready (milliseconds)
pub const SERVER_READY_POLL_INTERVAL_MS: u64 = 50;

// ============================================================================
// Test Events
// ============================================================================

pub const CONCERT_NAME: &str = "Concert";
pub const CONCERT_DATE: &str = "2024-05-01";

pub fn concert_body(price: f64) -> Value {
    json!({
        "name": CONCERT_NAME,
        "price": price,
        "description": "Live show",
        "event_type": "music",
        "date": CONCERT_DATE,
    })
}

pub fn named_event_body(name: &str) -> Value {
    json!({
        "name": name,
        "price": 10.0,
        "description": "",
        "event_type": "talk",
        "date": "2024-06-01",
    })
}
