/// API route handlers
///
/// - `health`: Health check
/// - `auth`: Registration and login
/// - `profile`: Authenticated user's profile
/// - `projects`: Project CRUD
/// - `tasks`: Task CRUD
/// - `teams`: Team roster management
/// - `comments`: Task comments

pub mod auth;
pub mod comments;
pub mod health;
pub mod profile;
pub mod projects;
pub mod tasks;
pub mod teams;

use serde::Serialize;

/// Body returned by delete endpoints
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always true
    pub success: bool,

    /// Human-readable confirmation
    pub message: String,
}

impl MessageResponse {
    /// Creates a success message body
    pub fn new(message: &str) -> Self {
        Self {
            success: true,
            message: message.to_string(),
        }
    }
}
