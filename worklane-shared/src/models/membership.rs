/// Membership model and database operations
///
/// A membership is a (project, user, role) row. It is the access-control
/// root: every authorization decision in Worklane starts from a
/// membership lookup on this table.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_role AS ENUM ('owner', 'admin', 'member');
///
/// CREATE TABLE memberships (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id),
///     role project_role NOT NULL DEFAULT 'member',
///     joined_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     UNIQUE (project_id, user_id)
/// );
/// ```
///
/// # Roles
///
/// - **owner**: Full control, including project deletion
/// - **admin**: Manage the team, the project, and all tasks
/// - **member**: Work inside the project (tasks, comments)
///
/// Every project must retain at least one owner at all times; the
/// invariant is enforced on removal inside a transaction (see
/// `services::teams::remove_member`).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgConnection, PgExecutor, PgPool};
use uuid::Uuid;

use super::user::UserSummary;

/// Project-scoped roles, in descending privilege order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ProjectRole {
    /// Full control, including project deletion
    Owner,

    /// Can manage the team, the project, and all tasks
    Admin,

    /// Can work inside the project
    Member,
}

impl ProjectRole {
    /// Converts role to string for display
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectRole::Owner => "owner",
            ProjectRole::Admin => "admin",
            ProjectRole::Member => "member",
        }
    }

    /// Checks if this role meets the required privilege level
    ///
    /// Hierarchy: Owner > Admin > Member
    pub fn has_permission(&self, required: &ProjectRole) -> bool {
        self.permission_level() >= required.permission_level()
    }

    /// Numeric privilege level for comparison
    fn permission_level(&self) -> u8 {
        match self {
            ProjectRole::Owner => 3,
            ProjectRole::Admin => 2,
            ProjectRole::Member => 1,
        }
    }
}

impl Default for ProjectRole {
    fn default() -> Self {
        ProjectRole::Member
    }
}

/// Membership model representing a user-project relationship with a role
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    /// Membership row ID
    pub id: Uuid,

    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role within the project
    pub role: ProjectRole,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,
}

/// Membership joined with the member's user record, for team listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    /// Membership row ID
    pub id: Uuid,

    /// Project ID
    pub project_id: Uuid,

    /// Role within the project
    pub role: ProjectRole,

    /// When the user joined the project
    pub joined_at: DateTime<Utc>,

    /// The member's user record
    pub user: UserSummary,
}

#[derive(sqlx::FromRow)]
struct TeamMemberRow {
    id: Uuid,
    project_id: Uuid,
    role: ProjectRole,
    joined_at: DateTime<Utc>,
    user_id: Uuid,
    username: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        Self {
            id: row.id,
            project_id: row.project_id,
            role: row.role,
            joined_at: row.joined_at,
            user: UserSummary {
                id: row.user_id,
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
            },
        }
    }
}

/// Input for creating a new membership
#[derive(Debug, Clone)]
pub struct CreateMembership {
    /// Project ID
    pub project_id: Uuid,

    /// User ID
    pub user_id: Uuid,

    /// Role to assign
    pub role: ProjectRole,
}

impl Membership {
    /// Creates a new membership (adds a user to a project)
    ///
    /// Takes any executor so the owner membership can be inserted inside
    /// the project-creation transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The (project, user) pair already exists (unique constraint)
    /// - Project or user doesn't exist (foreign key violation)
    /// - Database connection fails
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateMembership,
    ) -> Result<Self, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            INSERT INTO memberships (project_id, user_id, role)
            VALUES ($1, $2, $3)
            RETURNING id, project_id, user_id, role, joined_at
            "#,
        )
        .bind(data.project_id)
        .bind(data.user_id)
        .bind(data.role)
        .fetch_one(executor)
        .await?;

        Ok(membership)
    }

    /// Finds a membership by its row ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, project_id, user_id, role, joined_at
            FROM memberships
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Finds a specific membership by project and user
    pub async fn find(
        pool: &PgPool,
        project_id: Uuid,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        let membership = sqlx::query_as::<_, Membership>(
            r#"
            SELECT id, project_id, user_id, role, joined_at
            FROM memberships
            WHERE project_id = $1 AND user_id = $2
            "#,
        )
        .bind(project_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;

        Ok(membership)
    }

    /// Lists one page of a project's roster joined with user records
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TeamMember>, sqlx::Error> {
        let rows = sqlx::query_as::<_, TeamMemberRow>(
            r#"
            SELECT m.id, m.project_id, m.role, m.joined_at,
                   u.id AS user_id, u.username, u.email, u.first_name, u.last_name
            FROM memberships m
            JOIN users u ON u.id = m.user_id
            WHERE m.project_id = $1
            ORDER BY m.joined_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(project_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(TeamMember::from).collect())
    }

    /// Counts members of a project
    pub async fn count_for_project(pool: &PgPool, project_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM memberships WHERE project_id = $1")
                .bind(project_id)
                .fetch_one(pool)
                .await?;

        Ok(count)
    }

    /// Locks a project's roster rows and counts its owners
    ///
    /// Runs `SELECT ... FOR UPDATE` so the owner count cannot change
    /// between the check and the removal in the same transaction. This
    /// closes the race between two concurrent removals in the two-owner
    /// case.
    pub async fn lock_and_count_owners(
        conn: &mut PgConnection,
        project_id: Uuid,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM (
                SELECT role FROM memberships
                WHERE project_id = $1
                FOR UPDATE
            ) roster
            WHERE roster.role = 'owner'
            "#,
        )
        .bind(project_id)
        .fetch_one(conn)
        .await?;

        Ok(count)
    }

    /// Deletes a membership by row ID
    pub async fn delete_by_id<'e>(
        executor: impl PgExecutor<'e>,
        id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM memberships WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_as_str() {
        assert_eq!(ProjectRole::Owner.as_str(), "owner");
        assert_eq!(ProjectRole::Admin.as_str(), "admin");
        assert_eq!(ProjectRole::Member.as_str(), "member");
    }

    #[test]
    fn test_role_hierarchy() {
        assert!(ProjectRole::Owner.has_permission(&ProjectRole::Owner));
        assert!(ProjectRole::Owner.has_permission(&ProjectRole::Admin));
        assert!(ProjectRole::Owner.has_permission(&ProjectRole::Member));

        assert!(!ProjectRole::Admin.has_permission(&ProjectRole::Owner));
        assert!(ProjectRole::Admin.has_permission(&ProjectRole::Admin));
        assert!(ProjectRole::Admin.has_permission(&ProjectRole::Member));

        assert!(!ProjectRole::Member.has_permission(&ProjectRole::Owner));
        assert!(!ProjectRole::Member.has_permission(&ProjectRole::Admin));
        assert!(ProjectRole::Member.has_permission(&ProjectRole::Member));
    }

    #[test]
    fn test_role_wire_format() {
        assert_eq!(serde_json::to_string(&ProjectRole::Owner).unwrap(), "\"owner\"");

        let parsed: ProjectRole = serde_json::from_str("\"admin\"").unwrap();
        assert_eq!(parsed, ProjectRole::Admin);

        assert!(serde_json::from_str::<ProjectRole>("\"viewer\"").is_err());
    }

    #[test]
    fn test_default_role_is_member() {
        assert_eq!(ProjectRole::default(), ProjectRole::Member);
    }

    // Integration tests for database operations are in tests/service_tests.rs
}
