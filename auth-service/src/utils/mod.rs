pub mod email;
pub mod password;
pub mod validation;

pub use email::{is_valid_email, normalize_email};
pub use password::{hash_password, verify_password, Password};
pub use validation::ValidatedJson;
