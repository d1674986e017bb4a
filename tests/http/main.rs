//! HTTP transport integration tests.
//!
//! Starts an axum server on an ephemeral port and talks to it with reqwest,
//! both raw and through `HttpTransport`.

use std::sync::Arc;

use serde_json::{json, Value};
use showcase::client::{ClientError, HttpTransport, SetupClient, SetupFeed};
use showcase::rpc::{self, ErrorCode, ErrorEnvelope, USER_ID};
use showcase::{mock_setups, InMemoryModelStore, SetupStore};

/// Bind to port 0 and return the base URL.
async fn start_server() -> String {
    let store = SetupStore::new(InMemoryModelStore::new());
    store.seed(mock_setups()).unwrap();
    let app = rpc::router(Arc::new(rpc::setup_service(store)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn health_lists_procedures() {
    let base = start_server().await;

    let resp = reqwest::get(format!("{base}/health")).await.unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["ok"], true);
    assert_eq!(
        body["procedures"][0],
        json!({ "name": "setup.all", "kind": "query" })
    );
    assert_eq!(body["procedures"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn bare_post_runs_a_query() {
    let base = start_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/setup.all"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body.as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn headers_become_the_session() {
    let base = start_server().await;
    let client = reqwest::Client::new();

    let resp = client
        .post(format!("{base}/setup.like"))
        .json(&json!({ "id": "2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);
    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.error.code, ErrorCode::Unauthorized);

    let resp = client
        .post(format!("{base}/setup.like"))
        .header(USER_ID, "user-1")
        .json(&json!({ "id": "2" }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["likes"], 90);
}

#[tokio::test]
async fn malformed_json_is_bad_request() {
    let base = start_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/setup.byId"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);
    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.error.code, ErrorCode::BadRequest);
}

#[tokio::test]
async fn unknown_procedure_is_method_not_found() {
    let base = start_server().await;

    let resp = reqwest::Client::new()
        .post(format!("{base}/setup.explode"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
    let envelope: ErrorEnvelope = resp.json().await.unwrap();
    assert_eq!(envelope.error.code, ErrorCode::MethodNotFound);
}

#[tokio::test]
async fn typed_client_over_http() {
    let base = start_server().await;
    let client = SetupClient::new(HttpTransport::new(format!("{base}/")));

    assert_eq!(client.by_id("3").await.unwrap().unwrap().likes, 27);
    assert_eq!(client.by_id("nope").await.unwrap(), None);
    assert!(matches!(
        client.delete("3").await,
        Err(ClientError::Unauthorized(_))
    ));

    client.sign_in("user-1");
    assert_eq!(client.delete("3").await.unwrap().id, "3");
    assert!(matches!(
        client.delete("3").await,
        Err(ClientError::NotFound(_))
    ));
}

#[tokio::test]
async fn feed_over_http() {
    let base = start_server().await;
    let feed = SetupFeed::new(SetupClient::new(HttpTransport::new(base)));

    let listed = feed.load().await.unwrap();
    assert_eq!(listed[0].likes, 42);

    let rolled_back = feed.like("1").await;
    assert!(!rolled_back.is_committed());
    assert_eq!(feed.setups()[0].likes, 42);

    feed.sign_in("user-1");
    assert!(feed.like("1").await.is_committed());
    assert_eq!(feed.setups()[0].likes, 43);
    assert_eq!(feed.load().await.unwrap()[0].likes, 43);
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = SetupClient::new(HttpTransport::new(format!("http://{addr}")));
    let err = client.all().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert!(err.is_retryable());
}
