/// Domain services for Worklane
///
/// One module per entity. Every service method is the same sequence:
/// existence checks for referenced entities, an authorization policy
/// check, the mutation or query, and a shaped result (often a re-fetch
/// joined with related entities for response convenience).
///
/// Services take the pool handle explicitly and report failures as typed
/// [`crate::error::ServiceError`] values; nothing here retries. The only
/// multi-statement atomic units are project creation (project row plus
/// owner membership row) and team-member removal (row-locked owner count
/// plus delete).
///
/// # Modules
///
/// - `users`: Registration, login, and profile management
/// - `projects`: Project CRUD and member-scoped listing
/// - `teams`: Roster management with the last-owner invariant
/// - `tasks`: Task CRUD with assignee membership validation
/// - `comments`: Comments with two-path deletion authorization

pub mod comments;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;
