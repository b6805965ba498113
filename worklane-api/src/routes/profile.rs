/// Profile endpoints for the authenticated user
///
/// # Endpoints
///
/// - `GET /profile` - Fetch the authenticated user's profile
/// - `PUT /profile` - Update username, email, names, or password

use crate::{
    app::AppState,
    error::{validation_details, ApiResult},
};
use axum::{extract::State, Extension};
use crate::extract::Json;
use serde::Deserialize;
use validator::Validate;
use worklane_shared::{
    auth::middleware::AuthContext,
    models::user::User,
    services::users::{self, UpdateProfile},
};

/// Profile update request; only supplied fields are written
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    /// New username
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,

    /// New email address
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    /// New password (re-hashed server-side)
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: Option<String>,

    /// New given name
    #[validate(length(max = 100, message = "First name must be at most 100 characters"))]
    pub first_name: Option<String>,

    /// New family name
    #[validate(length(max = 100, message = "Last name must be at most 100 characters"))]
    pub last_name: Option<String>,
}

/// Fetch the authenticated user's profile
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
) -> ApiResult<Json<User>> {
    let user = users::get_profile(&state.db, auth.user_id).await?;
    Ok(Json(user))
}

/// Update the authenticated user's profile
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `409 Conflict`: New username or email already taken
pub async fn update_profile(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<User>> {
    req.validate().map_err(|e| validation_details(&e))?;

    let user = users::update_profile(
        &state.db,
        auth.user_id,
        UpdateProfile {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        },
    )
    .await?;

    Ok(Json(user))
}
