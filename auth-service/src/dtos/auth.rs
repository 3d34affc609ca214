use serde::{Deserialize, Serialize};
use validator::Validate;

// Login requests skip `validator` on purpose: a malformed email must fail
// with the same InvalidCredentials outcome as a wrong password, not a
// validation error that reveals the address was never registrable.
#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub display_name: String,
    pub organizational_unit_id: i32,
}

/// The extractor-level rules cover the "all fields non-empty" step of
/// registration; the ordered field checks live in the service.
#[derive(Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    #[validate(length(min = 1, message = "Email is required"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[validate(length(min = 1, message = "Password confirmation is required"))]
    pub password_confirmation: String,

    pub organizational_unit_id: i32,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub message: String,
}

/// The session surface the reporting views consume. Unknown or absent
/// sessions serialize as the unauthenticated shape rather than an error.
#[derive(Debug, Serialize, Deserialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organizational_unit_id: Option<i32>,
}

impl SessionResponse {
    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            display_name: None,
            organizational_unit_id: None,
        }
    }
}
