//! HTTP client for end-to-end tests
//!
//! Wraps reqwest with one method per event endpoint.

use super::constants::*;
use reqwest::Response;
use serde_json::Value;
use std::time::Duration;

pub struct TestClient {
    /// The underlying reqwest client (public for custom requests in tests)
    pub client: reqwest::Client,
    pub base_url: String,
}

impl TestClient {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .expect("Failed to build reqwest client");

        Self { client, base_url }
    }

    pub async fn get_stats(&self) -> Response {
        self.client
            .get(format!("{}/", self.base_url))
            .send()
            .await
            .expect("Stats request failed")
    }

    // ========================================================================
    // Event Endpoints
    // ========================================================================

    pub async fn list_events(&self) -> Response {
        self.client
            .get(format!("{}/eventos", self.base_url))
            .send()
            .await
            .expect("List events request failed")
    }

    /// Lists events and decodes the body, asserting a 200.
    pub async fn list_events_json(&self) -> Vec<Value> {
        let response = self.list_events().await;
        assert_eq!(response.status(), reqwest::StatusCode::OK);
        response.json().await.expect("Event list was not JSON")
    }

    pub async fn create_event(&self, body: &Value) -> Response {
        self.client
            .post(format!("{}/eventos", self.base_url))
            .json(body)
            .send()
            .await
            .expect("Create event request failed")
    }

    pub async fn update_event(&self, id: &str, body: &Value) -> Response {
        self.client
            .put(format!("{}/eventos/{}", self.base_url, id))
            .json(body)
            .send()
            .await
            .expect("Update event request failed")
    }

    pub async fn delete_event(&self, id: &str) -> Response {
        self.client
            .delete(format!("{}/eventos/{}", self.base_url, id))
            .send()
            .await
            .expect("Delete event request failed")
    }

    /// Sends `body` verbatim as a JSON request, for malformed payloads.
    pub async fn post_raw(&self, path: &str, body: &str) -> Response {
        self.client
            .post(format!("{}{}", self.base_url, path))
            .header("content-type", "application/json")
            .body(body.to_string())
            .send()
            .await
            .expect("Raw request failed")
    }
}
