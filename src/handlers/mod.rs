//! HTTP handlers

pub mod servers;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::StoreError;

/// Liveness probe; answers without touching storage.
pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from server-registry" }))
}

pub(crate) fn json_error(status: StatusCode, message: impl ToString) -> Response {
    (status, Json(json!({ "error": message.to_string() }))).into_response()
}

pub(crate) fn store_error_response(err: StoreError) -> Response {
    let status = match err {
        StoreError::NotFound => StatusCode::NOT_FOUND,
        StoreError::BadRequest(_) => StatusCode::BAD_REQUEST,
        StoreError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    json_error(status, err)
}
