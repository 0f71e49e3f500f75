//! End-to-end tests for the event endpoints
//!
//! Drives a real server over HTTP and checks both the responses and the
//! cache that sits behind them.

mod common;

use common::{
    concert_body, named_event_body, FailingEventStore, SlowEventStore, TestClient, TestServer,
    CONCERT_DATE, CONCERT_NAME,
};
use reqwest::StatusCode;
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;

// =============================================================================
// Lifecycle
// =============================================================================

#[tokio::test]
async fn test_concert_lifecycle() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_event(&concert_body(25.0)).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(response.text().await.unwrap(), "Event 1 created successfully.");

    let events = client.list_events_json().await;
    assert_eq!(events.len(), 1);
    assert_eq!(events[0]["id"], 1);
    assert_eq!(events[0]["name"], CONCERT_NAME);
    assert_eq!(events[0]["price"], 25.0);
    assert_eq!(events[0]["date"], CONCERT_DATE);

    let response = client.update_event("1", &concert_body(30.0)).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Event updated successfully.");
    assert_eq!(server.event_service.cached_event(1).unwrap().price, 30.0);

    let events = client.list_events_json().await;
    assert_eq!(events[0]["price"], 30.0);

    let response = client.delete_event("1").await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), "Event deleted successfully.");

    assert!(client.list_events_json().await.is_empty());
    assert_eq!(server.event_service.cached_events_count(), 0);
}

#[tokio::test]
async fn test_ids_are_not_reused_after_delete() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.create_event(&named_event_body("first")).await;
    client.create_event(&named_event_body("second")).await;
    client.delete_event("2").await;

    let response = client.create_event(&named_event_body("third")).await;
    assert_eq!(response.text().await.unwrap(), "Event 3 created successfully.");

    let ids: Vec<i64> = client
        .list_events_json()
        .await
        .iter()
        .map(|event| event["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![1, 3]);
}

#[tokio::test]
async fn test_body_id_is_ignored_on_create() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let mut body = named_event_body("with id");
    body["id"] = json!(42);
    let response = client.create_event(&body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let events = client.list_events_json().await;
    assert_eq!(events[0]["id"], 1);
}

#[tokio::test]
async fn test_stats_report_cached_events() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.create_event(&named_event_body("a")).await;
    client.create_event(&named_event_body("b")).await;

    let response = client.get_stats().await;
    assert_eq!(response.status(), StatusCode::OK);
    let stats: serde_json::Value = response.json().await.unwrap();
    assert_eq!(stats["cached_events"], 2);
}

// =============================================================================
// Missing Records
// =============================================================================

#[tokio::test]
async fn test_delete_is_idempotent() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    client.create_event(&concert_body(25.0)).await;

    assert_eq!(client.delete_event("1").await.status(), StatusCode::OK);
    assert_eq!(client.delete_event("1").await.status(), StatusCode::OK);
    assert!(client.list_events_json().await.is_empty());
}

#[tokio::test]
async fn test_update_of_missing_id_changes_nothing() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.update_event("99", &concert_body(10.0)).await;
    assert_eq!(response.status(), StatusCode::OK);

    assert!(client.list_events_json().await.is_empty());
    assert!(server.event_service.cached_event(99).is_none());
}

// =============================================================================
// Rejected Requests
// =============================================================================

#[tokio::test]
async fn test_malformed_body_returns_400() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.post_raw("/eventos", "{not json").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.post_raw("/eventos", r#"{"price": "free"}"#).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(client.list_events_json().await.is_empty());
}

#[tokio::test]
async fn test_invalid_fields_return_400() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_event(&concert_body(-5.0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.create_event(&named_event_body("")).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    assert!(client.list_events_json().await.is_empty());
}

#[tokio::test]
async fn test_non_numeric_id_returns_400() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.update_event("abc", &concert_body(10.0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = client.delete_event("abc").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_without_id_returns_400() {
    let server = TestServer::spawn().await;
    let client = TestClient::new(server.base_url.clone());

    let response = client
        .client
        .delete(format!("{}/eventos", server.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(response.text().await.unwrap(), "Event id not specified");
}

// =============================================================================
// Storage Failures
// =============================================================================

#[tokio::test]
async fn test_storage_failure_returns_500() {
    let server = TestServer::spawn_with_store(Arc::new(FailingEventStore), None).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_events().await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        "Storage error, please retry later"
    );

    let response = client.create_event(&concert_body(25.0)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let response = client.update_event("1", &concert_body(30.0)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        "Storage error, please retry later"
    );

    let response = client.delete_event("1").await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(server.event_service.cached_events_count(), 0);
}

#[tokio::test]
async fn test_validation_precedes_storage() {
    let server = TestServer::spawn_with_store(Arc::new(FailingEventStore), None).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.create_event(&concert_body(-1.0)).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_slow_storage_times_out_with_500() {
    let store = Arc::new(SlowEventStore::new(Duration::from_millis(500)));
    let server =
        TestServer::spawn_with_timeout(store, None, Duration::from_millis(50)).await;
    let client = TestClient::new(server.base_url.clone());

    let response = client.list_events().await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        response.text().await.unwrap(),
        "Storage error, please retry later"
    );

    let response = client.update_event("1", &concert_body(30.0)).await;
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}
