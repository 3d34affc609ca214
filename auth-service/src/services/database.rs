//! Credential store access. `CredentialStore` is the seam the rest of the
//! service talks through; `Database` is the PostgreSQL implementation.

use crate::models::{Credential, NewCredential, OrganizationalUnit};
use crate::services::ServiceError;
use async_trait::async_trait;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};

/// Read/write surface over the `login` and `organizational_units` tables.
///
/// Every call borrows a pooled connection for its own duration; nothing is
/// held across calls. Connectivity failures come back as
/// [`ServiceError::StoreUnavailable`] so callers can surface a retryable
/// error instead of crashing.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a credential by its normalized email.
    async fn find_by_email(&self, normalized_email: &str)
        -> Result<Option<Credential>, ServiceError>;

    /// Insert a new credential. A concurrent duplicate loses against the
    /// unique constraint and gets [`ServiceError::EmailAlreadyRegistered`].
    async fn insert(&self, credential: NewCredential) -> Result<(), ServiceError>;

    /// Units ordered by display name, for the registration form.
    async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, ServiceError>;

    /// Connectivity probe for the health endpoint.
    async fn ping(&self) -> Result<(), ServiceError>;
}

/// PostgreSQL connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    #[instrument(skip(database_url))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, ServiceError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| {
                ServiceError::StoreUnavailable(anyhow::anyhow!("Failed to connect: {}", e))
            })?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), ServiceError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ServiceError::Internal(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }
}

#[async_trait]
impl CredentialStore for Database {
    #[instrument(skip(self, normalized_email))]
    async fn find_by_email(
        &self,
        normalized_email: &str,
    ) -> Result<Option<Credential>, ServiceError> {
        // Matching on LOWER(email) keeps pre-existing mixed-case rows
        // reachable even though new rows are stored normalized.
        sqlx::query_as::<_, Credential>(
            r#"
            SELECT name AS display_name, email, password_hash, organizational_unit_id
            FROM login
            WHERE LOWER(email) = $1
            LIMIT 1
            "#,
        )
        .bind(normalized_email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            ServiceError::StoreUnavailable(anyhow::anyhow!("Failed to look up credential: {}", e))
        })
    }

    #[instrument(skip(self, credential))]
    async fn insert(&self, credential: NewCredential) -> Result<(), ServiceError> {
        sqlx::query(
            r#"
            INSERT INTO login (name, email, password_hash, organizational_unit_id)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(&credential.display_name)
        .bind(&credential.email)
        .bind(&credential.password_hash)
        .bind(credential.organizational_unit_id)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                ServiceError::EmailAlreadyRegistered
            }
            _ => ServiceError::StoreUnavailable(anyhow::anyhow!(
                "Failed to insert credential: {}",
                e
            )),
        })?;

        info!(
            organizational_unit_id = credential.organizational_unit_id,
            "Credential registered"
        );

        Ok(())
    }

    #[instrument(skip(self))]
    async fn list_units(&self) -> Result<Vec<OrganizationalUnit>, ServiceError> {
        sqlx::query_as::<_, OrganizationalUnit>(
            r#"
            SELECT id, name AS display_name
            FROM organizational_units
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            ServiceError::StoreUnavailable(anyhow::anyhow!("Failed to list units: {}", e))
        })
    }

    async fn ping(&self) -> Result<(), ServiceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| {
                ServiceError::StoreUnavailable(anyhow::anyhow!("Health check failed: {}", e))
            })?;
        Ok(())
    }
}
