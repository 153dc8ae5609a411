mod common;

use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use regex::Regex;
use serde_json::json;
use short_keys::api::handlers::{resolve_handler, shorten_handler};
use short_keys::infrastructure::cache::MemoryCache;
use short_keys::infrastructure::persistence::MemoryKeyStore;
use short_keys::state::AppState;
use std::sync::Arc;

fn server_for(state: AppState) -> TestServer {
    let app = Router::new()
        .route("/api/shorten", post(shorten_handler))
        .route("/api/shorten/{key}", get(resolve_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_shorten_generates_key() {
    let server = server_for(common::create_test_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    let key = json["short_key"].as_str().unwrap();

    assert!(Regex::new(r"^[A-Za-z][A-Za-z0-9]{5}$").unwrap().is_match(key));
    assert_eq!(json["long_url"], "https://example.com");
    assert_eq!(json["short_url"], format!("{}/{}", common::BASE_URL, key));
    assert!(json["created_at"].is_string());
}

#[tokio::test]
async fn test_shorten_then_resolve() {
    let server = server_for(common::create_test_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com/some/long/path?q=1" }))
        .await;
    let key = response.json::<serde_json::Value>()["short_key"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/api/shorten/{}", key)).await;

    response.assert_status_ok();
    response.assert_text("https://example.com/some/long/path?q=1");
}

#[tokio::test]
async fn test_shorten_with_custom_key() {
    let server = server_for(common::create_test_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.org", "custom_key": "abcdef" }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["short_key"], "abcdef");

    let response = server.get("/api/shorten/abcdef").await;
    response.assert_text("https://example.org");
}

#[tokio::test]
async fn test_shorten_duplicate_custom_key() {
    let server = server_for(common::create_test_state());

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://first.example", "custom_key": "abcdef" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://second.example", "custom_key": "abcdef" }))
        .await;

    assert_eq!(response.status_code(), 409);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "conflict");

    // The original mapping is untouched.
    server
        .get("/api/shorten/abcdef")
        .await
        .assert_text("https://first.example");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let server = server_for(common::create_test_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let server = server_for(common::create_test_state());

    let response = server.post("/api/shorten").json(&json!({ "url": "" })).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_invalid_custom_keys() {
    let server = server_for(common::create_test_state());

    for bad in ["abc", "abcdefg", "1abcde", "ab-cde"] {
        let response = server
            .post("/api/shorten")
            .json(&json!({ "url": "https://example.com", "custom_key": bad }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(
            response.json::<serde_json::Value>()["error"]["code"],
            "validation_error",
            "custom key {bad:?} should be rejected"
        );
    }
}

#[tokio::test]
async fn test_shorten_keyspace_exhausted() {
    let store = Arc::new(MemoryKeyStore::new());
    let generator = Arc::new(common::ScriptedKeyGenerator::new(&["aaaaaa"]));
    let state = common::create_state_with(store, generator, Arc::new(MemoryCache::new()), 5);
    let server = server_for(state);

    server
        .post("/api/shorten")
        .json(&json!({ "url": "https://one.example" }))
        .await
        .assert_status_ok();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://two.example" }))
        .await;

    assert_eq!(response.status_code(), 503);
    assert_eq!(
        response.json::<serde_json::Value>()["error"]["code"],
        "keyspace_exhausted"
    );
}

#[tokio::test]
async fn test_resolve_unknown_key() {
    let server = server_for(common::create_test_state());

    let response = server.get("/api/shorten/zzzzzz").await;

    response.assert_status_not_found();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_resolve_malformed_key() {
    let server = server_for(common::create_test_state());

    server.get("/api/shorten/toolongkey").await.assert_status_not_found();
    server.get("/api/shorten/1abcde").await.assert_status_not_found();
}
