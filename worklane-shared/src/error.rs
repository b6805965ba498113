/// Common error type for the domain services
///
/// Every service method reports failures through [`ServiceError`]. The API
/// layer maps each variant to an HTTP status code and a uniform
/// `{success: false, message}` body. All failures are terminal for the
/// request; nothing in the service layer retries.

use crate::auth::password::PasswordError;

/// Service result type alias
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Errors raised by the domain services
///
/// # Variants and their HTTP mappings
///
/// - `NotFound` → 404 (also used to hide the existence of resources from
///   non-members)
/// - `Forbidden` → 403 (authenticated but the policy denies the action)
/// - `Conflict` → 409 (duplicate unique field, last-owner removal)
/// - `InvalidReference` → 400 (a referenced entity is unusable, e.g. an
///   assignee who is not a member of the task's project)
/// - `InvalidCredentials` → 401
/// - `Database` / `Password` → 500
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced entity does not exist (or the requester may not know it does)
    #[error("{0}")]
    NotFound(String),

    /// Policy denies the action for this requester
    #[error("{0}")]
    Forbidden(String),

    /// Unique constraint or invariant violation
    #[error("{0}")]
    Conflict(String),

    /// A referenced entity exists but cannot be used this way
    #[error("{0}")]
    InvalidReference(String),

    /// Email/password pair did not match a user
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password hashing or verification failure
    #[error("Password operation failed: {0}")]
    Password(#[from] PasswordError),
}

impl ServiceError {
    /// Shorthand for a `NotFound` with a formatted message
    pub fn not_found(what: &str) -> Self {
        ServiceError::NotFound(format!("{} not found", what))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = ServiceError::not_found("Project");
        assert_eq!(err.to_string(), "Project not found");
    }

    #[test]
    fn test_invalid_credentials_message_is_opaque() {
        // Login failures must not reveal whether the email exists.
        let err = ServiceError::InvalidCredentials;
        assert_eq!(err.to_string(), "Invalid email or password");
    }

    #[test]
    fn test_database_error_from() {
        let err: ServiceError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, ServiceError::Database(_)));
    }
}
