//! Test helpers: an in-memory credential store behind the
//! `CredentialStore` seam, plus router plumbing for driving handlers
//! through `tower::ServiceExt::oneshot` without a running server.

#![allow(dead_code)]

use async_trait::async_trait;
use auth_service::{
    build_router,
    config::{
        AuthConfig, DatabaseConfig, Environment, LockoutConfig, RateLimitConfig, SecurityConfig,
    },
    models::{Credential, LockoutPolicy, NewCredential, OrganizationalUnit},
    services::{AuthService, CredentialStore, ServiceError, SessionManager},
    AppState,
};
use axum::{
    body::Body,
    http::{header, Request, Response, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use service_core::middleware::rate_limit::create_ip_rate_limiter;
use std::sync::{
    atomic::{AtomicBool, AtomicU32, Ordering},
    Arc, Mutex,
};
use tower::util::ServiceExt;

/// In-memory stand-in for the PostgreSQL store. Counts queries so tests
/// can assert that validation failures never touch the store, and can be
/// switched into a failing mode to simulate an outage.
#[derive(Default)]
pub struct InMemoryStore {
    rows: Mutex<Vec<Credential>>,
    units: Mutex<Vec<OrganizationalUnit>>,
    query_count: AtomicU32,
    unavailable: AtomicBool,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_units(units: Vec<OrganizationalUnit>) -> Self {
        let store = Self::default();
        *store.units.lock().unwrap() = units;
        store
    }

    pub fn query_count(&self) -> u32 {
        self.query_count.load(Ordering::SeqCst)
    }

    pub fn row_count(&self) -> usize {
        self.rows.lock().unwrap().len()
    }

    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), ServiceError> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(ServiceError::StoreUnavailable(anyhow::anyhow!(
                "simulated outage"
            )))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl CredentialStore for InMemoryStore {
    async fn find_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<Credential>, ServiceError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email.to_lowercase() == normalized_email)
            .cloned())
    }

    async fn insert(&self, credential: NewCredential) -> Result<(), ServiceError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut rows = self.rows.lock().unwrap();
        // Mimics the unique index on LOWER(email)
        if rows
            .iter()
            .any(|c| c.email.to_lowercase() == credential.email.to_lowercase())
        {
            return Err(ServiceError::EmailAlreadyRegistered);
        }
        rows.push(Credential {
            display_name: credential.display_name,
            email: credential.email,
            password_hash: credential.password_hash,
            organizational_unit_id: credential.organizational_unit_id,
        });
        Ok(())
    }

    async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, ServiceError> {
        self.query_count.fetch_add(1, Ordering::SeqCst);
        self.check_available()?;
        let mut units = self.units.lock().unwrap().clone();
        units.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        Ok(units)
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        self.check_available()
    }
}

pub fn test_config() -> AuthConfig {
    AuthConfig {
        common: service_core::config::Config {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        environment: Environment::Dev,
        service_name: "auth-service-test".to_string(),
        service_version: "0.0.0".to_string(),
        log_level: "error".to_string(),
        database: DatabaseConfig {
            url: "postgres://unused".to_string(),
            max_connections: 5,
            min_connections: 1,
        },
        security: SecurityConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
        lockout: LockoutConfig {
            max_failed_attempts: 5,
            cooldown_seconds: 120,
        },
        rate_limit: RateLimitConfig {
            global_ip_limit: 10_000,
            global_ip_window_seconds: 60,
        },
    }
}

pub fn test_router(store: Arc<InMemoryStore>) -> Router {
    test_router_with_policy(store, LockoutPolicy::default())
}

pub fn test_router_with_policy(store: Arc<InMemoryStore>, policy: LockoutPolicy) -> Router {
    let config = test_config();
    let store: Arc<dyn CredentialStore> = store;
    let state = AppState {
        config,
        store: store.clone(),
        auth: AuthService::new(store),
        sessions: SessionManager::new(policy),
        ip_rate_limiter: create_ip_rate_limiter(10_000, 60),
    };
    build_router(state)
}

pub async fn post_json(
    router: &Router,
    uri: &str,
    body: serde_json::Value,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

pub async fn get(router: &Router, uri: &str, cookie: Option<&str>) -> Response<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let request = builder.body(Body::empty()).unwrap();
    router.clone().oneshot(request).await.unwrap()
}

/// Extract the `name=value` part of the session cookie from a response.
pub fn session_cookie(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.split(';').next().unwrap_or("").to_string())
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Register a user through the API and assert it succeeded.
pub async fn register_user(
    router: &Router,
    name: &str,
    email: &str,
    password: &str,
    organizational_unit_id: i32,
) {
    let response = post_json(
        router,
        "/auth/register",
        serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "password_confirmation": password,
            "organizational_unit_id": organizational_unit_id,
        }),
        None,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
}
