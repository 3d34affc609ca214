pub mod auth;
pub mod database;
pub mod error;
pub mod session;

pub use auth::{AuthService, UserProfile};
pub use database::{CredentialStore, Database};
pub use error::ServiceError;
pub use session::SessionManager;
