/// Authenticated request context
///
/// After the API server's JWT layer validates a Bearer token, it inserts
/// an [`AuthContext`] into the request extensions. Handlers extract it
/// with Axum's `Extension` extractor and pass the identity down to the
/// domain services.
///
/// # Example
///
/// ```
/// use axum::Extension;
/// use worklane_shared::auth::middleware::AuthContext;
///
/// async fn handler(Extension(auth): Extension<AuthContext>) -> String {
///     format!("Hello, {}!", auth.username)
/// }
/// ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::jwt::Claims;

/// Errors raised while extracting credentials from a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// No Authorization header present
    #[error("Missing authorization header")]
    MissingCredentials,

    /// Authorization header is not a Bearer token
    #[error("{0}")]
    InvalidFormat(String),
}

/// Pulls the token out of an `Authorization: Bearer <token>` header value
///
/// Token validation itself is the caller's job; this only handles the
/// header scheme.
///
/// # Errors
///
/// - `AuthError::MissingCredentials` when no header was sent
/// - `AuthError::InvalidFormat` when the header is not a Bearer token
pub fn extract_bearer_token(header: Option<&str>) -> Result<&str, AuthError> {
    let header = header.ok_or(AuthError::MissingCredentials)?;

    header
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AuthError::InvalidFormat("Expected Bearer token".to_string()))
}

/// Identity of the authenticated requester
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthContext {
    /// Authenticated user ID
    pub user_id: Uuid,

    /// Email address from the token
    pub email: String,

    /// Username from the token
    pub username: String,
}

impl AuthContext {
    /// Creates an auth context from validated JWT claims
    pub fn from_claims(claims: &Claims) -> Self {
        Self {
            user_id: claims.sub,
            email: claims.email.clone(),
            username: claims.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_claims() {
        let claims = Claims::new(
            Uuid::new_v4(),
            "jdoe@example.com".to_string(),
            "jdoe".to_string(),
        );

        let ctx = AuthContext::from_claims(&claims);
        assert_eq!(ctx.user_id, claims.sub);
        assert_eq!(ctx.email, "jdoe@example.com");
        assert_eq!(ctx.username, "jdoe");
    }

    #[test]
    fn test_extract_bearer_token() {
        let token = extract_bearer_token(Some("Bearer abc.def.ghi")).unwrap();
        assert_eq!(token, "abc.def.ghi");
    }

    #[test]
    fn test_extract_bearer_token_missing_header() {
        assert!(matches!(
            extract_bearer_token(None),
            Err(AuthError::MissingCredentials)
        ));
    }

    #[test]
    fn test_extract_bearer_token_wrong_scheme() {
        assert!(matches!(
            extract_bearer_token(Some("Basic dXNlcjpwYXNz")),
            Err(AuthError::InvalidFormat(_))
        ));
        assert!(matches!(
            extract_bearer_token(Some("Bearer ")),
            Err(AuthError::InvalidFormat(_))
        ));
        assert!(matches!(
            extract_bearer_token(Some("bearer abc")),
            Err(AuthError::InvalidFormat(_))
        ));
    }
}
