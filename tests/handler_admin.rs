mod common;

use axum_test::TestServer;
use std::sync::Arc;

#[tokio::test]
async fn test_clear_cache_reports_deleted_items() {
    let products = Arc::new(common::FixtureProducts::new(common::five_products()));
    let state = common::create_test_state(products.clone(), common::sample_categories());
    let server = TestServer::new(common::app(state)).unwrap();

    for query in ["brand=a", "brand=b", "sort=cheap", "page=2&limit=2"] {
        server
            .get(&format!("/api/listing?{query}"))
            .await
            .assert_status_ok();
    }
    assert_eq!(products.listing_calls(), 4);

    let response = server.post("/api/admin/clear-cache").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["success"], true);
    assert_eq!(json["deletedItems"], 4);
    assert!(json["message"].is_string());

    server.get("/api/listing?brand=a").await.assert_status_ok();
    assert_eq!(products.listing_calls(), 5);
}

#[tokio::test]
async fn test_clear_empty_cache() {
    let products = Arc::new(common::FixtureProducts::new(vec![]));
    let state = common::create_test_state(products, vec![]);
    let server = TestServer::new(common::app(state)).unwrap();

    let response = server.post("/api/admin/clear-cache").await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["deletedItems"], 0);
}

#[tokio::test]
async fn test_clear_cache_requires_post() {
    let products = Arc::new(common::FixtureProducts::new(vec![]));
    let state = common::create_test_state(products, vec![]);
    let server = TestServer::new(common::app(state)).unwrap();

    server
        .get("/api/admin/clear-cache")
        .expect_failure()
        .await
        .assert_status(axum::http::StatusCode::METHOD_NOT_ALLOWED);
}
