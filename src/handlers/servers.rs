//! Server record handlers

use std::time::Duration;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tokio::time::timeout;
use tracing::info;

use super::{json_error, store_error_response};
use crate::model::NewServer;
use crate::storage::ServerStore;
use crate::AppState;

/// Deadline for a single storage call made on behalf of a request.
const STORE_TIMEOUT: Duration = Duration::from_secs(5);

pub async fn create(
    State(state): State<AppState>,
    body: Result<Json<NewServer>, JsonRejection>,
) -> Response {
    let Json(server) = match body {
        Ok(body) => body,
        Err(rejection) => return json_error(StatusCode::BAD_REQUEST, rejection.body_text()),
    };

    match timeout(STORE_TIMEOUT, state.store.create(server)).await {
        Ok(Ok(id)) => {
            info!(id = %id, "created new server");
            Json(json!({ "id": id })).into_response()
        }
        Ok(Err(err)) => store_error_response(err),
        Err(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage deadline exceeded",
        ),
    }
}

pub async fn get(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match timeout(STORE_TIMEOUT, state.store.get(&id)).await {
        Ok(Ok(server)) => Json(server).into_response(),
        Ok(Err(err)) => store_error_response(err),
        Err(_) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "storage deadline exceeded",
        ),
    }
}
