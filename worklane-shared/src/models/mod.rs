/// Database models for Worklane
///
/// This module contains all database models and their queries.
///
/// # Models
///
/// - `user`: User accounts
/// - `project`: Owned work containers
/// - `membership`: User-project relationships with roles (the
///   access-control root)
/// - `task`: Units of work inside a project
/// - `comment`: Authored notes attached to tasks
///
/// # Example
///
/// ```no_run
/// use worklane_shared::models::user::{User, CreateUser};
/// use worklane_shared::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let new_user = CreateUser {
///     username: "jdoe".to_string(),
///     email: "user@example.com".to_string(),
///     password_hash: "$argon2id$...".to_string(),
///     first_name: Some("John".to_string()),
///     last_name: None,
/// };
///
/// let user = User::create(&pool, new_user).await?;
/// # Ok(())
/// # }
/// ```

pub mod comment;
pub mod membership;
pub mod project;
pub mod task;
pub mod user;
