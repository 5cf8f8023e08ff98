mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use std::sync::Arc;

#[tokio::test]
async fn test_health_endpoint_success() {
    let products = Arc::new(common::FixtureProducts::new(vec![]));
    let state = common::create_test_state(products, vec![]);
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
    assert!(json.get("version").is_some());
}

#[tokio::test]
async fn test_health_endpoint_degraded() {
    let products = Arc::new(common::FixtureProducts::new(vec![]));
    products.set_failing(true);
    let state = common::create_test_state(products, vec![]);
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.get("/health").expect_failure().await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["database"]["status"], "error");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}
