//! Server registry HTTP API
//!
//! A thin HTTP layer over a MongoDB-backed store of server records: create a
//! record, fetch it back by id, and a liveness probe. The router and the
//! storage client are the whole system; everything else belongs to the
//! database driver.

pub mod error;
pub mod handlers;
pub mod model;
pub mod storage;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::trace::TraceLayer;

use storage::ServerStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ServerStore>,
}

/// Process-wide configuration, built once at startup and passed down.
#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub mongo_uri: String,
    pub mongo_db: String,
}

/// Build the application router.
///
/// Access logging covers the `/v1` subtree only; the liveness route stays
/// out of the logs.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::health))
        .nest("/v1", api_routes().layer(TraceLayer::new_for_http()))
        .layer(CatchPanicLayer::new())
        .with_state(state)
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/server", post(handlers::servers::create))
        .route("/server/:id", get(handlers::servers::get))
}
