/// Project model and database operations
///
/// Projects are owned work containers. Every project is created together
/// with an owner membership for its creator (see
/// `services::projects::create`), and access to everything inside a
/// project is gated through the memberships table.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE project_status AS ENUM ('active', 'completed', 'on_hold');
///
/// CREATE TABLE projects (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     name VARCHAR(200) NOT NULL,
///     description TEXT,
///     status project_status NOT NULL DEFAULT 'active',
///     created_by UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::pagination::SortOrder;

/// Project lifecycle status
///
/// There is no transition graph: any authorized actor may set any status
/// at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "project_status", rename_all = "snake_case")]
#[serde(rename_all = "kebab-case")]
pub enum ProjectStatus {
    /// Work is ongoing
    Active,

    /// Work is finished
    Completed,

    /// Work is paused
    OnHold,
}

impl Default for ProjectStatus {
    fn default() -> Self {
        ProjectStatus::Active
    }
}

/// Sortable columns for project listings
///
/// Parsed from the `sort` query parameter; anything outside the
/// whitelist falls back to `CreatedAt`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectSort {
    Name,
    Status,
    CreatedAt,
    UpdatedAt,
}

impl ProjectSort {
    /// Parses a wire-format sort key
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "name" => Some(ProjectSort::Name),
            "status" => Some(ProjectSort::Status),
            "createdAt" | "created_at" => Some(ProjectSort::CreatedAt),
            "updatedAt" | "updated_at" => Some(ProjectSort::UpdatedAt),
            _ => None,
        }
    }

    /// Column name for the ORDER BY clause
    fn column(&self) -> &'static str {
        match self {
            ProjectSort::Name => "name",
            ProjectSort::Status => "status",
            ProjectSort::CreatedAt => "created_at",
            ProjectSort::UpdatedAt => "updated_at",
        }
    }
}

impl Default for ProjectSort {
    fn default() -> Self {
        ProjectSort::CreatedAt
    }
}

/// Project model
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Unique project ID
    pub id: Uuid,

    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Lifecycle status
    pub status: ProjectStatus,

    /// Creator reference (also the initial owner)
    pub created_by: Uuid,

    /// When the project was created
    pub created_at: DateTime<Utc>,

    /// When the project was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new project
#[derive(Debug, Clone)]
pub struct CreateProject {
    /// Project name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (defaults to Active)
    pub status: ProjectStatus,

    /// Creating user
    pub created_by: Uuid,
}

/// Input for updating a project
#[derive(Debug, Clone, Default)]
pub struct UpdateProject {
    /// New name
    pub name: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<ProjectStatus>,
}

impl Project {
    /// Inserts a project row
    ///
    /// Takes any executor so it can run inside the project-creation
    /// transaction alongside the owner membership insert.
    pub async fn create<'e>(
        executor: impl PgExecutor<'e>,
        data: CreateProject,
    ) -> Result<Self, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            INSERT INTO projects (name, description, status, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, description, status, created_by, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .bind(data.created_by)
        .fetch_one(executor)
        .await?;

        Ok(project)
    }

    /// Finds a project by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            SELECT id, name, description, status, created_by, created_at, updated_at
            FROM projects
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Lists one page of projects the user is a member of
    ///
    /// `search` filters by case-insensitive substring match on the name.
    /// The sort column comes from the [`ProjectSort`] whitelist, so
    /// interpolating it into the query is safe.
    pub async fn list_for_member(
        pool: &PgPool,
        user_id: Uuid,
        search: Option<&str>,
        sort: ProjectSort,
        order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT p.id, p.name, p.description, p.status, p.created_by,
                   p.created_at, p.updated_at
            FROM projects p
            JOIN memberships m ON m.project_id = p.id
            WHERE m.user_id = $1
              AND ($2::text IS NULL OR p.name ILIKE '%' || $2 || '%')
            ORDER BY p.{} {}
            LIMIT $3 OFFSET $4
            "#,
            sort.column(),
            order.as_sql()
        );

        let projects = sqlx::query_as::<_, Project>(&query)
            .bind(user_id)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(projects)
    }

    /// Counts projects the user is a member of, honoring the same filter
    pub async fn count_for_member(
        pool: &PgPool,
        user_id: Uuid,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM projects p
            JOIN memberships m ON m.project_id = p.id
            WHERE m.user_id = $1
              AND ($2::text IS NULL OR p.name ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(user_id)
        .bind(search)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Applies a partial update and returns the updated row
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateProject,
    ) -> Result<Option<Self>, sqlx::Error> {
        let project = sqlx::query_as::<_, Project>(
            r#"
            UPDATE projects
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, description, status, created_by, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.name)
        .bind(data.description)
        .bind(data.status)
        .fetch_optional(pool)
        .await?;

        Ok(project)
    }

    /// Deletes a project; tasks and memberships cascade in the store
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_format() {
        assert_eq!(
            serde_json::to_string(&ProjectStatus::OnHold).unwrap(),
            "\"on-hold\""
        );
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Active).unwrap(),
            "\"active\""
        );

        let parsed: ProjectStatus = serde_json::from_str("\"on-hold\"").unwrap();
        assert_eq!(parsed, ProjectStatus::OnHold);
    }

    #[test]
    fn test_status_rejects_unknown_values() {
        let result = serde_json::from_str::<ProjectStatus>("\"archived\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_sort_parse_whitelist() {
        assert_eq!(ProjectSort::parse("name"), Some(ProjectSort::Name));
        assert_eq!(ProjectSort::parse("createdAt"), Some(ProjectSort::CreatedAt));
        assert_eq!(ProjectSort::parse("created_at"), Some(ProjectSort::CreatedAt));
        assert_eq!(ProjectSort::parse("password_hash"), None);
        assert_eq!(ProjectSort::parse("id; DROP TABLE projects"), None);
    }

    #[test]
    fn test_default_sort_is_created_at() {
        assert_eq!(ProjectSort::default(), ProjectSort::CreatedAt);
    }
}
