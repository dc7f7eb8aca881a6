//! HTTP request handlers for the long-polling server.

use axum::{
    Json, Router,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use lpoll_core::{ClientId, PollOutcome, PublishOutcome};
use serde::{Deserialize, Serialize};

use super::state::HttpServerState;
use crate::error::{ErrorBody, RequestError};

/// Body of a publish request.
#[derive(Debug, Clone, Deserialize)]
struct PublishRequest {
    message: String,
}

/// Body of a successful publish response.
#[derive(Debug, Clone, Serialize)]
struct PublishedBody {
    message: &'static str,
}

/// Create the Axum router for HTTP long-polling.
pub fn router(state: HttpServerState) -> Router {
    Router::new()
        .route("/poll/{client_id}", get(handle_poll))
        .route("/poll", get(missing_client_id))
        .route("/poll/", get(missing_client_id))
        .route("/publish/{client_id}", post(handle_publish))
        .route("/publish", post(missing_client_id))
        .route("/publish/", post(missing_client_id))
        .with_state(state)
}

/// Handle poll requests (long-polling for the client's next event).
async fn handle_poll(
    State(state): State<HttpServerState>,
    Path(client_id): Path<String>,
) -> Result<Response, RequestError> {
    let client_id = ClientId::new(client_id)?;

    let outcome = tokio::select! {
        outcome = state.hub().poll(&client_id) => outcome,
        () = state.shutdown().cancelled() => {
            tracing::debug!(client_id = %client_id, "poll released by shutdown");
            PollOutcome::Empty
        }
    };

    Ok(match outcome {
        PollOutcome::Delivered(event) => (StatusCode::OK, Json(event)).into_response(),
        PollOutcome::Empty | PollOutcome::ClientGone => StatusCode::NO_CONTENT.into_response(),
    })
}

/// Handle publish requests (deposit an event for one client).
async fn handle_publish(
    State(state): State<HttpServerState>,
    Path(client_id): Path<String>,
    body: Result<Json<PublishRequest>, JsonRejection>,
) -> Result<Response, RequestError> {
    let client_id = ClientId::new(client_id)?;
    let Json(request) = body?;
    if request.message.is_empty() {
        return Err(RequestError::MissingMessage);
    }

    Ok(match state.hub().publish(&client_id, request.message).await {
        PublishOutcome::Delivered => (
            StatusCode::OK,
            Json(PublishedBody {
                message: "Event published.",
            }),
        )
            .into_response(),
        PublishOutcome::NotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorBody::new("Client not found")),
        )
            .into_response(),
        PublishOutcome::Dropped => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(ErrorBody::new("Client channel is full, skipping event.")),
        )
            .into_response(),
    })
}

/// Reject requests whose path has no client identifier.
async fn missing_client_id() -> RequestError {
    RequestError::MissingClientId
}
