use std::collections::HashSet;
use std::sync::Arc;

use mongodb::bson::oid::ObjectId;
use reqwest::StatusCode;
use serde_json::{json, Value};

use server_registry::storage::{MemoryStore, ServerStore};
use server_registry::{build_router, AppState};

struct TestServer {
    base_url: String,
    store: Arc<MemoryStore>,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod, bound to an ephemeral port, memory-backed.
        let store = Arc::new(MemoryStore::new());
        let app = build_router(AppState {
            store: store.clone(),
        });
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{addr}");

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            store,
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn create_then_get_returns_submitted_fields() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/v1/server"))
        .json(&json!({ "hostname": "db-1", "region": "eu-west-1" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    let id = body["id"].as_str().expect("create response carries an id");

    let res = client
        .get(server.url(&format!("/v1/server/{id}")))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["id"], id);
    assert_eq!(body["hostname"], "db-1");
    assert_eq!(body["region"], "eu-west-1");
}

#[tokio::test]
async fn malformed_id_yields_bad_request() {
    let server = TestServer::spawn().await;

    let res = reqwest::get(server.url("/v1/server/definitely-not-an-object-id"))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn unknown_id_yields_not_found() {
    let server = TestServer::spawn().await;

    // Well-formed id that no record carries
    let id = ObjectId::new().to_hex();
    let res = reqwest::get(server.url(&format!("/v1/server/{id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn malformed_body_never_reaches_storage() {
    let server = TestServer::spawn().await;
    // A torn-down store turns any storage call into a 500, so a 400 here
    // proves the request was rejected before the storage layer.
    server.store.close().await.unwrap();

    let res = reqwest::Client::new()
        .post(server.url("/v1/server"))
        .header("content-type", "application/json")
        .body("{ this is not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn liveness_survives_torn_down_storage() {
    let server = TestServer::spawn().await;
    server.store.close().await.unwrap();

    let res = reqwest::get(server.url("/")).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = res.json().await.unwrap();
    assert!(body["message"].is_string());

    // The store really is down: a read now surfaces as a server error.
    let id = ObjectId::new().to_hex();
    let res = reqwest::get(server.url(&format!("/v1/server/{id}")))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn concurrent_creates_yield_distinct_records() {
    let server = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let mut tasks = Vec::new();
    for n in 0..8 {
        let client = client.clone();
        let url = server.url("/v1/server");
        tasks.push(tokio::spawn(async move {
            let res = client
                .post(url)
                .json(&json!({ "n": n }))
                .send()
                .await
                .unwrap();
            assert_eq!(res.status(), StatusCode::OK);
            let body: Value = res.json().await.unwrap();
            (n, body["id"].as_str().unwrap().to_string())
        }));
    }

    let mut ids = HashSet::new();
    for task in tasks {
        let (n, id) = task.await.unwrap();
        assert!(ids.insert(id.clone()), "duplicate id {id}");

        let res = client
            .get(server.url(&format!("/v1/server/{id}")))
            .send()
            .await
            .unwrap();
        let body: Value = res.json().await.unwrap();
        assert_eq!(body["n"], n);
    }
    assert_eq!(ids.len(), 8);
}
