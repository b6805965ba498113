/// User service: registration, login, and profile management
///
/// Registration hashes the password with Argon2id before the insert;
/// profile updates re-hash when a new password is supplied. Duplicate
/// usernames and emails surface as `Conflict` via the store's unique
/// constraints.

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::password::{hash_password, verify_password};
use crate::error::{ServiceError, ServiceResult};
use crate::models::user::{CreateUser, UpdateUser, User};

/// Input for registering a new account
#[derive(Debug, Clone)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Input for updating the authenticated user's profile
#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// Registers a new user
///
/// # Errors
///
/// - `Conflict` when the username or email is already taken
/// - `Password` when hashing fails
pub async fn register(pool: &PgPool, data: RegisterUser) -> ServiceResult<User> {
    let password_hash = hash_password(&data.password)?;

    let result = User::create(
        pool,
        CreateUser {
            username: data.username,
            email: data.email,
            password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
        },
    )
    .await;

    result.map_err(map_unique_violation)
}

/// Authenticates an email/password pair
///
/// # Errors
///
/// Returns `InvalidCredentials` for an unknown email or a wrong
/// password; the two cases are indistinguishable to the caller.
pub async fn authenticate(pool: &PgPool, email: &str, password: &str) -> ServiceResult<User> {
    let user = User::find_by_email(pool, email)
        .await?
        .ok_or(ServiceError::InvalidCredentials)?;

    if !verify_password(password, &user.password_hash)? {
        return Err(ServiceError::InvalidCredentials);
    }

    Ok(user)
}

/// Fetches the authenticated user's profile
pub async fn get_profile(pool: &PgPool, user_id: Uuid) -> ServiceResult<User> {
    User::find_by_id(pool, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))
}

/// Updates the authenticated user's profile
///
/// A supplied password is re-hashed before storage.
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    data: UpdateProfile,
) -> ServiceResult<User> {
    let password_hash = match data.password.as_deref() {
        Some(password) => Some(hash_password(password)?),
        None => None,
    };

    let updated = User::update(
        pool,
        user_id,
        UpdateUser {
            username: data.username,
            email: data.email,
            password_hash,
            first_name: data.first_name,
            last_name: data.last_name,
        },
    )
    .await
    .map_err(map_unique_violation)?;

    updated.ok_or_else(|| ServiceError::not_found("User"))
}

/// Maps unique-constraint violations on users to Conflict errors
fn map_unique_violation(err: sqlx::Error) -> ServiceError {
    if let sqlx::Error::Database(ref db_err) = err {
        if let Some(constraint) = db_err.constraint() {
            if constraint.contains("email") {
                return ServiceError::Conflict("Email is already in use".to_string());
            }
            if constraint.contains("username") {
                return ServiceError::Conflict("Username is already taken".to_string());
            }
        }
    }

    err.into()
}
