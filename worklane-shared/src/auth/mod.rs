/// Authentication utilities
///
/// This module provides the authentication primitives for Worklane:
///
/// # Modules
///
/// - [`password`]: Argon2id password hashing and verification
/// - [`jwt`]: JWT token generation and validation
/// - [`middleware`]: The authenticated request context
///
/// # Security Features
///
/// - **Password Hashing**: Argon2id with 64 MB memory, 3 iterations
/// - **JWT Tokens**: HS256 signing, 24 hour expiry
/// - **Constant-time Comparison**: Password verification uses
///   constant-time operations

pub mod jwt;
pub mod middleware;
pub mod password;
