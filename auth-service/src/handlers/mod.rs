pub mod auth;
pub mod units;
