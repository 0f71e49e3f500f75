use anyhow::{Context, Result};
use std::future::Future;
use std::net::SocketAddr;
use std::time::{Duration, Instant};
use tracing::info;

use super::{event_routes::make_event_routes, log_requests, state::*, ServerConfig};
use axum::{extract::State, middleware, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub hash: String,
    pub cached_events: usize,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        hash: state.hash.clone(),
        cached_events: state.event_service.cached_events_count(),
    };
    Json(stats)
}

impl ServerState {
    fn new(config: ServerConfig, event_service: GuardedEventService) -> ServerState {
        ServerState {
            config,
            start_time: Instant::now(),
            event_service,
            hash: env!("GIT_HASH").to_owned(),
        }
    }
}

pub fn make_app(config: ServerConfig, event_service: GuardedEventService) -> Router {
    let state = ServerState::new(config, event_service);

    let home_router: Router = Router::new()
        .route("/", get(home))
        .with_state(state.clone());

    home_router
        .merge(make_event_routes(state.clone()))
        .layer(middleware::from_fn_with_state(state, log_requests))
}

/// Serves the REST interface until `shutdown` resolves.
pub async fn run_server<F>(
    config: ServerConfig,
    event_service: GuardedEventService,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind port {}", config.port))?;

    info!("Ready to serve at port {}!", config.port);
    let app = make_app(config, event_service);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .context("HTTP server failed")?;
    info!("HTTP server stopped");
    Ok(())
}
