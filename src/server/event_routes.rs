//! Event HTTP routes.
//!
//! Thin translation between HTTP and the event service:
//! - GET    /eventos       list every event
//! - POST   /eventos       create an event
//! - PUT    /eventos/{id}  replace an event's fields
//! - DELETE /eventos/{id}  delete an event

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use thiserror::Error;
use tracing::{error, warn};

use crate::event_service::{EventService, ServiceError, ServiceResult};
use crate::event_store::{EventDraft, StorageError};
use crate::server::state::{GuardedEventService, ServerState};

/// Request bodies that could not be turned into an event draft.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("Malformed request body: {0}")]
    MalformedBody(String),
}

impl From<JsonRejection> for ProtocolError {
    fn from(rejection: JsonRejection) -> Self {
        ProtocolError::MalformedBody(rejection.body_text())
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Protocol(err) => {
                warn!("Rejected request: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            ApiError::Service(ServiceError::Validation(err)) => {
                warn!("Rejected request: {}", err);
                (StatusCode::BAD_REQUEST, err.to_string()).into_response()
            }
            // Details stay in the logs
            ApiError::Service(ServiceError::Storage(err)) => {
                error!("Storage failure while serving request: {}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Storage error, please retry later",
                )
                    .into_response()
            }
        }
    }
}

/// Runs a service call off the async runtime, bounded by the configured
/// storage timeout. The call keeps running if the timeout elapses; its
/// outcome is still applied to the cache when it completes.
async fn call_service<T, F>(state: &ServerState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&EventService) -> ServiceResult<T> + Send + 'static,
{
    let service: GuardedEventService = state.event_service.clone();
    let timeout = state.config.storage_timeout;
    let task = tokio::task::spawn_blocking(move || f(service.as_ref()));

    match tokio::time::timeout(timeout, task).await {
        Ok(Ok(result)) => Ok(result?),
        Ok(Err(join_err)) => Err(ServiceError::Storage(StorageError::Unavailable(format!(
            "storage task failed: {}",
            join_err
        )))
        .into()),
        Err(_) => Err(ServiceError::Storage(StorageError::Timeout(timeout)).into()),
    }
}

async fn list_events(State(state): State<ServerState>) -> Result<Response, ApiError> {
    let events = call_service(&state, |service| service.list_events()).await?;
    Ok(Json(events).into_response())
}

async fn create_event(
    State(state): State<ServerState>,
    body: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = body.map_err(ProtocolError::from)?;
    let event = call_service(&state, move |service| service.create_event(draft)).await?;
    Ok((
        StatusCode::CREATED,
        format!("Event {} created successfully.", event.id),
    )
        .into_response())
}

async fn update_event(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    body: Result<Json<EventDraft>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(draft) = body.map_err(ProtocolError::from)?;
    call_service(&state, move |service| service.update_event(&id, draft)).await?;
    Ok((StatusCode::OK, "Event updated successfully.").into_response())
}

async fn delete_event(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    call_service(&state, move |service| service.delete_event(&id)).await?;
    Ok((StatusCode::OK, "Event deleted successfully.").into_response())
}

/// DELETE without an id in the path.
async fn delete_event_without_id(State(state): State<ServerState>) -> Result<Response, ApiError> {
    call_service(&state, |service| service.delete_event("")).await?;
    Ok((StatusCode::OK, "Event deleted successfully.").into_response())
}

pub fn make_event_routes(state: ServerState) -> Router {
    Router::new()
        .route(
            "/eventos",
            get(list_events)
                .post(create_event)
                .delete(delete_event_without_id),
        )
        .route("/eventos/{id}", put(update_event).delete(delete_event))
        .with_state(state)
}
