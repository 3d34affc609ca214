/// The normalized form is the uniqueness key for credentials: trimmed of
/// surrounding whitespace and lower-cased. Registration and login must
/// normalize identically or mixed-case signups would shadow each other.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Basic `local@domain.tld` shape check, applied to the normalized form.
/// Intentionally loose; the credential store's unique constraint is the
/// real gate.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let mut parts = email.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(local), Some(domain), None) => {
            !local.is_empty()
                && domain.len() >= 3
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
        }
        _ => false,
    }
}
