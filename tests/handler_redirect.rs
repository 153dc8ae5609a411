mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use serde_json::json;
use short_keys::api::handlers::redirect_handler;

#[tokio::test]
async fn test_redirect_success() {
    let state = common::create_test_state();
    state
        .shortener
        .shorten("https://example.com/target".to_string(), Some("redir1".to_string()))
        .await
        .unwrap();

    let app = Router::new()
        .route("/{key}", get(redirect_handler))
        .with_state(state);
    let server = TestServer::new(app).unwrap();

    let response = server.get("/redir1").await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let app = Router::new()
        .route("/{key}", get(redirect_handler))
        .with_state(common::create_test_state());
    let server = TestServer::new(app).unwrap();

    server.get("/zzzzzz").await.assert_status_not_found();
    server.get("/notakey").await.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_after_api_shorten() {
    let server = TestServer::new(common::create_test_router(common::create_test_state())).unwrap();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "https://example.com" }))
        .await;
    response.assert_status_ok();
    let key = response.json::<serde_json::Value>()["short_key"]
        .as_str()
        .unwrap()
        .to_string();

    let response = server.get(&format!("/{}", key)).await;

    assert_eq!(response.status_code(), 307);
    assert_eq!(response.header("location"), "https://example.com");
}
