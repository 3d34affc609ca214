use serde::Serialize;
use sqlx::FromRow;

/// A business location the account is scoped to. Reference data owned by
/// an external administrative process; this service only reads it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct OrganizationalUnit {
    pub id: i32,
    pub display_name: String,
}
