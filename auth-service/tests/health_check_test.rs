mod common;

use axum::http::StatusCode;
use common::{body_json, get, InMemoryStore};
use std::sync::Arc;

#[tokio::test]
async fn health_check_reports_healthy_when_store_is_up() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store);

    let response = get(&router, "/health", None).await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["postgres"], "up");
}

#[tokio::test]
async fn health_check_fails_when_store_is_down() {
    let store = Arc::new(InMemoryStore::new());
    store.set_unavailable(true);
    let router = common::test_router(store);

    let response = get(&router, "/health", None).await;
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
