use service_core::error::AppError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServiceError {
    /// Unknown email and wrong password are deliberately merged so the
    /// response never reveals which emails are registered.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Too many failed attempts. Try again in {retry_after_secs}s")]
    AccountLocked { retry_after_secs: u64 },

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    #[error("{0}")]
    Validation(String),

    #[error("Credential store unavailable")]
    StoreUnavailable(#[source] anyhow::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            ServiceError::AccountLocked { retry_after_secs } => AppError::TooManyRequests(
                "Too many failed attempts. Please try again later.".to_string(),
                Some(retry_after_secs),
            ),
            ServiceError::EmailAlreadyRegistered => {
                AppError::Conflict("Email already registered".to_string())
            }
            ServiceError::Validation(msg) => AppError::UnprocessableEntity(msg),
            ServiceError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Credential store unavailable");
                AppError::ServiceUnavailable
            }
            ServiceError::Internal(e) => AppError::InternalError(e),
        }
    }
}
