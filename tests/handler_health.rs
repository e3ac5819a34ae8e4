mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use linkcut::api::handlers::health_handler;

#[tokio::test]
async fn test_health_all_components_ok() {
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(common::create_test_state());
    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["storage"]["status"], "ok");
    assert_eq!(body["checks"]["cache"]["status"], "ok");
    assert!(body["version"].is_string());
}
