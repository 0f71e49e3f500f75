//! Test server lifecycle management
//!
//! Each test gets an isolated server with its own events database.

use super::constants::*;
use eventos_server::event_store::{
    Event, EventDraft, EventId, EventStore, StorageError, StorageResult,
};
use eventos_server::server::{make_app, RequestsLoggingLevel, ServerConfig};
use eventos_server::{EventService, SqliteEventStore};
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;
use tokio::net::TcpListener;

/// A record store whose every call fails, for exercising the 500 path.
pub struct FailingEventStore;

impl FailingEventStore {
    fn fail<T>() -> StorageResult<T> {
        Err(StorageError::Unavailable("test store is down".to_string()))
    }
}

impl EventStore for FailingEventStore {
    fn list_all(&self) -> StorageResult<Vec<Event>> {
        Self::fail()
    }

    fn insert(&self, _draft: &EventDraft) -> StorageResult<EventId> {
        Self::fail()
    }

    fn update(&self, _id: EventId, _draft: &EventDraft) -> StorageResult<bool> {
        Self::fail()
    }

    fn delete(&self, _id: EventId) -> StorageResult<bool> {
        Self::fail()
    }
}

/// Delegates to an in-memory store after sleeping `delay` on every call.
pub struct SlowEventStore {
    inner: SqliteEventStore,
    delay: Duration,
}

impl SlowEventStore {
    pub fn new(delay: Duration) -> Self {
        Self {
            inner: SqliteEventStore::in_memory().expect("Failed to open in-memory store"),
            delay,
        }
    }
}

impl EventStore for SlowEventStore {
    fn list_all(&self) -> StorageResult<Vec<Event>> {
        std::thread::sleep(self.delay);
        self.inner.list_all()
    }

    fn insert(&self, draft: &EventDraft) -> StorageResult<EventId> {
        std::thread::sleep(self.delay);
        self.inner.insert(draft)
    }

    fn update(&self, id: EventId, draft: &EventDraft) -> StorageResult<bool> {
        std::thread::sleep(self.delay);
        self.inner.update(id, draft)
    }

    fn delete(&self, id: EventId) -> StorageResult<bool> {
        std::thread::sleep(self.delay);
        self.inner.delete(id)
    }
}

/// Test server instance with an isolated database.
///
/// When dropped, the server gracefully shuts down and temp resources are cleaned up.
pub struct TestServer {
    /// Base URL for making requests (e.g., "http://127.0.0.1:12345")
    pub base_url: String,

    /// The service behind the routes, for inspecting the cache directly.
    pub event_service: Arc<EventService>,

    _temp_db_dir: Option<TempDir>,
    _shutdown_tx: Option<tokio::sync::oneshot::Sender<()>>,
}

impl TestServer {
    /// Spawns a new test server backed by a fresh SQLite file on a random port.
    pub async fn spawn() -> Self {
        let temp_db_dir = TempDir::new().expect("Failed to create temp dir");
        let db_path = temp_db_dir.path().join("eventos.db");
        let store = SqliteEventStore::new(&db_path, Duration::from_secs(1))
            .expect("Failed to open event store");

        Self::spawn_with_store(Arc::new(store), Some(temp_db_dir)).await
    }

    /// Spawns a test server in front of an arbitrary record store.
    pub async fn spawn_with_store(
        store: Arc<dyn EventStore>,
        temp_db_dir: Option<TempDir>,
    ) -> Self {
        Self::spawn_with_timeout(store, temp_db_dir, Duration::from_secs(2)).await
    }

    /// Like `spawn_with_store`, with an explicit bound on each storage call.
    pub async fn spawn_with_timeout(
        store: Arc<dyn EventStore>,
        temp_db_dir: Option<TempDir>,
        storage_timeout: Duration,
    ) -> Self {
        let event_service = Arc::new(EventService::new(store));

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind to random port");
        let port = listener
            .local_addr()
            .expect("Failed to get local address")
            .port();
        let base_url = format!("http://127.0.0.1:{}", port);

        let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

        let config = ServerConfig {
            port,
            requests_logging_level: RequestsLoggingLevel::None,
            storage_timeout,
        };
        let app = make_app(config, event_service.clone());

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .expect("Server failed");
        });

        let server = Self {
            base_url,
            event_service,
            _temp_db_dir: temp_db_dir,
            _shutdown_tx: Some(shutdown_tx),
        };

        server.wait_for_ready().await;

        server
    }

    /// Waits for the server to become ready by polling the stats endpoint
    async fn wait_for_ready(&self) {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .expect("Failed to build reqwest client");

        let start = std::time::Instant::now();
        let timeout = Duration::from_millis(SERVER_READY_TIMEOUT_MS);

        loop {
            if start.elapsed() > timeout {
                panic!(
                    "Server did not become ready within {}ms",
                    SERVER_READY_TIMEOUT_MS
                );
            }

            match client.get(format!("{}/", self.base_url)).send().await {
                Ok(response) if response.status().is_success() => return,
                _ => {
                    tokio::time::sleep(Duration::from_millis(SERVER_READY_POLL_INTERVAL_MS)).await;
                }
            }
        }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(tx) = self._shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
