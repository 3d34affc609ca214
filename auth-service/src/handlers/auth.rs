use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use chrono::Utc;
use service_core::error::AppError;
use uuid::Uuid;

use crate::{
    dtos::auth::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse, SessionResponse},
    services::ServiceError,
    utils::ValidatedJson,
    AppState,
};

pub const SESSION_COOKIE: &str = "dashboard_session";

/// Resolve the caller's session from the cookie jar, creating a fresh
/// unauthenticated session (and cookie) when none exists. The cookie must
/// be returned on failed logins too, or the lockout counter could not
/// follow the client across attempts.
fn resolve_session(state: &AppState, jar: CookieJar) -> (Uuid, CookieJar) {
    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        if let Ok(id) = Uuid::parse_str(cookie.value()) {
            if state.sessions.contains(id) {
                return (id, jar);
            }
        }
    }

    let id = state.sessions.create();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();
    (id, jar.add(cookie))
}

fn session_from_jar(jar: &CookieJar) -> Option<Uuid> {
    let cookie = jar.get(SESSION_COOKIE)?;
    Uuid::parse_str(cookie.value()).ok()
}

/// Login with email and password.
///
/// The lockout check runs before any credential work, so a blocked session
/// fails fast with 429 regardless of password correctness and without a
/// single store query.
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(req): Json<LoginRequest>,
) -> (CookieJar, Response) {
    let now = Utc::now();
    let (session_id, jar) = resolve_session(&state, jar);

    if let Some(retry_after_secs) = state.sessions.lockout_remaining(session_id, now) {
        let err: AppError = ServiceError::AccountLocked { retry_after_secs }.into();
        return (jar, err.into_response());
    }

    match state.auth.authenticate(&req.email, &req.password).await {
        Ok(profile) => {
            state.sessions.establish(
                session_id,
                profile.display_name.clone(),
                profile.organizational_unit_id,
            );
            let body = LoginResponse {
                display_name: profile.display_name,
                organizational_unit_id: profile.organizational_unit_id,
            };
            (jar, (StatusCode::OK, Json(body)).into_response())
        }
        Err(ServiceError::InvalidCredentials) => {
            state.sessions.record_failure(session_id, now);
            let err: AppError = ServiceError::InvalidCredentials.into();
            (jar, err.into_response())
        }
        Err(e) => {
            let err: AppError = e.into();
            (jar, err.into_response())
        }
    }
}

/// Register a new account. Does not log the caller in.
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.auth.register(req).await.map_err(AppError::from)?;
    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully".to_string(),
        }),
    ))
}

/// Current session state, consumed by the reporting views. An absent or
/// unknown cookie is just "not authenticated", never an error.
pub async fn session(State(state): State<AppState>, jar: CookieJar) -> Json<SessionResponse> {
    let response = session_from_jar(&jar)
        .and_then(|id| state.sessions.get(id))
        .map(|s| SessionResponse {
            authenticated: s.authenticated,
            display_name: s.display_name,
            organizational_unit_id: s.organizational_unit_id,
        })
        .unwrap_or_else(SessionResponse::unauthenticated);
    Json(response)
}

/// Logout: destroy the session and clear the cookie.
pub async fn logout(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Response) {
    if let Some(id) = session_from_jar(&jar) {
        if state.sessions.remove(id) {
            tracing::info!(session_id = %id, "Session destroyed");
        }
    }
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (
        jar,
        (
            StatusCode::OK,
            Json(serde_json::json!({ "message": "Logged out" })),
        )
            .into_response(),
    )
}
