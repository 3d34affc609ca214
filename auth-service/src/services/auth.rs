use crate::{
    dtos::auth::RegisterRequest,
    models::{NewCredential, OrganizationalUnit},
    services::{CredentialStore, ServiceError},
    utils::{hash_password, is_valid_email, normalize_email, verify_password, Password},
};
use std::sync::Arc;

/// What a successful authentication yields: everything the reporting
/// views need to scope their queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub display_name: String,
    pub organizational_unit_id: i32,
}

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
}

impl AuthService {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Validate an email/password pair against the credential store.
    ///
    /// The email is normalized before lookup so `" Foo@Bar.COM "` finds the
    /// row registered as `foo@bar.com`. An unknown email and a wrong
    /// password produce the same `InvalidCredentials` outcome. This method
    /// never touches session state; the login handler does that.
    pub async fn authenticate(
        &self,
        email: &str,
        password: &str,
    ) -> Result<UserProfile, ServiceError> {
        let email = normalize_email(email);
        if email.is_empty() || password.is_empty() {
            return Err(ServiceError::InvalidCredentials);
        }

        let credential = self
            .store
            .find_by_email(&email)
            .await?
            .ok_or(ServiceError::InvalidCredentials)?;

        if !verify_password(&Password::new(password), &credential.password_hash) {
            return Err(ServiceError::InvalidCredentials);
        }

        tracing::info!(
            organizational_unit_id = credential.organizational_unit_id,
            "Login verified"
        );

        Ok(UserProfile {
            display_name: credential.display_name,
            organizational_unit_id: credential.organizational_unit_id,
        })
    }

    /// Create a new credential row.
    ///
    /// Validation runs in a fixed order and the first failure wins; none of
    /// it touches the store. The uniqueness pre-check gives a friendly
    /// error in the common case, but the store's unique constraint is what
    /// actually closes the check-then-insert race: a concurrent duplicate
    /// surfaces as `EmailAlreadyRegistered` from the insert itself.
    pub async fn register(&self, req: RegisterRequest) -> Result<(), ServiceError> {
        let name = req.name.trim();
        if name.is_empty()
            || req.email.trim().is_empty()
            || req.password.is_empty()
            || req.password_confirmation.is_empty()
        {
            return Err(ServiceError::Validation("All fields are required".to_string()));
        }
        if req.password != req.password_confirmation {
            return Err(ServiceError::Validation("Passwords do not match".to_string()));
        }

        let email = normalize_email(&req.email);
        if !is_valid_email(&email) {
            return Err(ServiceError::Validation("Invalid email address".to_string()));
        }
        if req.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ServiceError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }

        if self.store.find_by_email(&email).await?.is_some() {
            return Err(ServiceError::EmailAlreadyRegistered);
        }

        let password_hash = hash_password(&Password::new(req.password))
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Password hashing error: {}", e)))?;

        self.store
            .insert(NewCredential {
                display_name: name.to_string(),
                email,
                password_hash,
                organizational_unit_id: req.organizational_unit_id,
            })
            .await?;

        tracing::info!(
            organizational_unit_id = req.organizational_unit_id,
            "User registered"
        );

        Ok(())
    }

    /// Units for the registration form, ordered by name.
    pub async fn units(&self) -> Result<Vec<OrganizationalUnit>, ServiceError> {
        self.store.list_units().await
    }

    /// Store connectivity probe, used by the health endpoint.
    pub async fn ping_store(&self) -> Result<(), ServiceError> {
        self.store.ping().await
    }
}
