use sqlx::FromRow;

/// A stored login row. The email is the normalized uniqueness key; the
/// hash is an Argon2id PHC string and is redacted from `Debug` output.
#[derive(Clone, FromRow)]
pub struct Credential {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub organizational_unit_id: i32,
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("display_name", &self.display_name)
            .field("email", &self.email)
            .field("password_hash", &"<redacted>")
            .field("organizational_unit_id", &self.organizational_unit_id)
            .finish()
    }
}

/// Input for inserting a credential. The caller is responsible for
/// normalizing the email and hashing the password beforehand.
#[derive(Clone)]
pub struct NewCredential {
    pub display_name: String,
    pub email: String,
    pub password_hash: String,
    pub organizational_unit_id: i32,
}
