//! # Worklane Shared Library
//!
//! This crate contains the data layer and business logic shared by the
//! Worklane API server: database models, authentication primitives,
//! the authorization policy, pagination helpers, and the domain services
//! that compose them.
//!
//! ## Module Organization
//!
//! - `db`: Connection pool and migration runner
//! - `models`: Database models and their queries
//! - `auth`: Password hashing, JWT tokens, and the authenticated context
//! - `policy`: Pure authorization decisions over project roles
//! - `pagination`: Page/limit/sort handling for list endpoints
//! - `services`: Domain services (users, projects, teams, tasks, comments)
//! - `error`: The common service error type

pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod pagination;
pub mod policy;
pub mod services;

/// Current version of the Worklane shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_set() {
        assert!(!VERSION.is_empty());
    }
}
