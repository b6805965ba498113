/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /register` - Register a new user
/// - `POST /login` - Login and get a token

use crate::{
    app::AppState,
    error::{validation_details, ApiResult},
};
use axum::{extract::State, http::StatusCode};
use crate::extract::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;
use worklane_shared::{
    auth::jwt::{self, Claims},
    models::user::User,
    services::users::{self, RegisterUser},
};

/// Register request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Unique username
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,

    /// Optional given name
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    /// Optional family name
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Email address
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Password
    pub password: String,
}

/// Body returned by register and login: the user plus a signed token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    /// The authenticated user (password hash never serialized)
    pub user: User,

    /// Signed JWT, valid for 24 hours
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /register
/// Content-Type: application/json
///
/// {
///   "username": "jdoe",
///   "email": "jdoe@example.com",
///   "password": "correct-horse-battery",
///   "firstName": "John"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: Username or email already taken
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    req.validate().map_err(|e| validation_details(&e))?;

    let user = users::register(
        &state.db,
        RegisterUser {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        },
    )
    .await?;

    let claims = Claims::new(user.id, user.email.clone(), user.username.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok((StatusCode::CREATED, Json(AuthResponse { user, token })))
}

/// Login with email and password
///
/// # Endpoint
///
/// ```text
/// POST /login
/// Content-Type: application/json
///
/// {
///   "email": "jdoe@example.com",
///   "password": "correct-horse-battery"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `401 Unauthorized`: Invalid credentials
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    req.validate().map_err(|e| validation_details(&e))?;

    let user = users::authenticate(&state.db, &req.email, &req.password).await?;

    let claims = Claims::new(user.id, user.email.clone(), user.username.clone());
    let token = jwt::create_token(&claims, state.jwt_secret())?;

    Ok(Json(AuthResponse { user, token }))
}
