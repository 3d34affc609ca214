//! Shared infrastructure for the dashboard services: error taxonomy,
//! configuration loading, logging setup, and common middleware.

pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
