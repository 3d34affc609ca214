mod common;

use axum::http::StatusCode;
use common::{body_json, post_json, register_user, InMemoryStore};
use std::sync::Arc;

fn register_body(
    name: &str,
    email: &str,
    password: &str,
    confirmation: &str,
    unit: i32,
) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "email": email,
        "password": password,
        "password_confirmation": confirmation,
        "organizational_unit_id": unit,
    })
}

#[tokio::test]
async fn register_then_authenticate_round_trip() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    register_user(&router, "Alice", "alice@x.com", "secret1", 3).await;
    assert_eq!(store.row_count(), 1);

    let login = post_json(
        &router,
        "/auth/login",
        serde_json::json!({ "email": "ALICE@X.COM", "password": "secret1" }),
        None,
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
    assert_eq!(body_json(login).await["organizational_unit_id"], 3);

    let bad = post_json(
        &router,
        "/auth/login",
        serde_json::json!({ "email": "alice@x.com", "password": "wrong" }),
        None,
    )
    .await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict_and_inserts_nothing() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    register_user(&router, "Alice", "alice@x.com", "secret1", 3).await;

    let response = post_json(
        &router,
        "/auth/register",
        register_body("Alice Again", "alice@x.com", "secret2", "secret2", 4),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(body_json(response).await["error"], "Email already registered");
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn duplicate_detection_is_case_and_whitespace_insensitive() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    register_user(&router, "Alice", "foo@bar.com", "secret1", 1).await;

    let response = post_json(
        &router,
        "/auth/register",
        register_body("Mallory", " Foo@Bar.COM ", "secret2", "secret2", 2),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(store.row_count(), 1);
}

#[tokio::test]
async fn short_password_is_rejected_before_any_store_access() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    let response = post_json(
        &router,
        "/auth/register",
        register_body("Alice", "alice@x.com", "abc", "abc", 3),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(
        body_json(response).await["error"],
        "Password must be at least 6 characters"
    );
    assert_eq!(store.query_count(), 0);
    assert_eq!(store.row_count(), 0);
}

#[tokio::test]
async fn empty_fields_are_rejected_first() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    let response = post_json(
        &router,
        "/auth/register",
        register_body("", "alice@x.com", "secret1", "secret1", 3),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn mismatched_confirmation_wins_over_later_checks() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    // Both the email and the password are also invalid; the confirmation
    // mismatch must be reported because it is checked earlier.
    let response = post_json(
        &router,
        "/auth/register",
        register_body("Alice", "not-an-email", "abc", "abcd", 3),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "Passwords do not match");
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn invalid_email_wins_over_short_password() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    let response = post_json(
        &router,
        "/auth/register",
        register_body("Alice", "not-an-email", "abc", "abc", 3),
        None,
    )
    .await;

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["error"], "Invalid email address");
    assert_eq!(store.query_count(), 0);
}

#[tokio::test]
async fn email_is_stored_normalized() {
    let store = Arc::new(InMemoryStore::new());
    let router = common::test_router(store.clone());

    register_user(&router, "Alice", " Alice@X.COM ", "secret1", 3).await;

    // Normalized at registration, so the plain lower-case form logs in
    let login = post_json(
        &router,
        "/auth/login",
        serde_json::json!({ "email": "alice@x.com", "password": "secret1" }),
        None,
    )
    .await;
    assert_eq!(login.status(), StatusCode::OK);
}
