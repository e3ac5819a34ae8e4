mod common;

use axum::http::StatusCode;
use axum::{
    Router,
    routing::{get, post},
};
use axum_test::TestServer;
use linkcut::api::handlers::{redirect_handler, shorten_handler};
use serde_json::json;

fn redirect_app(state: linkcut::AppState) -> TestServer {
    let app = Router::new()
        .route("/{code}", get(redirect_handler))
        .route("/api/shorten", post(shorten_handler))
        .route("/api/{code}", get(redirect_handler))
        .with_state(state);

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_redirect_known_code() {
    let state = common::create_test_state();
    common::create_test_mapping(&state, "known123", "https://example.com/target").await;
    let server = redirect_app(state);

    let response = server.get("/known123").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/target"
    );
}

#[tokio::test]
async fn test_redirect_via_api_prefix() {
    let state = common::create_test_state();
    common::create_test_mapping(&state, "known123", "https://example.com/target").await;
    let server = redirect_app(state);

    let response = server.get("/api/known123").await;

    response.assert_status(StatusCode::FOUND);
    assert_eq!(
        response.header("location").to_str().unwrap(),
        "https://example.com/target"
    );
}

#[tokio::test]
async fn test_redirect_unknown_code_not_found() {
    let server = redirect_app(common::create_test_state());

    let response = server.get("/doesnotexist").await;

    response.assert_status_not_found();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_redirect_is_idempotent() {
    let state = common::create_test_state();
    common::create_test_mapping(&state, "known123", "https://example.com/target").await;
    let server = redirect_app(state);

    for _ in 0..3 {
        let response = server.get("/known123").await;
        response.assert_status(StatusCode::FOUND);
        assert_eq!(
            response.header("location").to_str().unwrap(),
            "https://example.com/target"
        );
    }
}

#[tokio::test]
async fn test_shorten_then_redirect_round_trip() {
    let server = redirect_app(common::create_test_state());

    let response = server
        .post("/api/shorten")
        .json(&json!({ "url": "http://example.com/0.123" }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let result = response.json::<serde_json::Value>()["result"]
        .as_str()
        .unwrap()
        .to_string();
    let code = result.rsplit('/').next().unwrap().to_string();

    let redirect = server.get(&format!("/{code}")).await;
    redirect.assert_status(StatusCode::FOUND);
    assert_eq!(
        redirect.header("location").to_str().unwrap(),
        "http://example.com/0.123"
    );
}
