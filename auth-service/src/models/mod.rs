mod credential;
mod session;
mod unit;

pub use credential::{Credential, NewCredential};
pub use session::{LockoutPolicy, Session};
pub use unit::OrganizationalUnit;
