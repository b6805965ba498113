/// Task model and database operations
///
/// Tasks are units of work inside a project. The assignee is a weak
/// reference to a user: it must be a member of the task's project when
/// set (enforced in `services::tasks`), and the store clears it if the
/// user row is ever removed.
///
/// # Schema
///
/// ```sql
/// CREATE TYPE task_status AS ENUM ('todo', 'in_progress', 'completed');
/// CREATE TYPE task_priority AS ENUM ('low', 'medium', 'high');
///
/// CREATE TABLE tasks (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     title VARCHAR(200) NOT NULL,
///     description TEXT,
///     status task_status NOT NULL DEFAULT 'todo',
///     priority task_priority NOT NULL DEFAULT 'medium',
///     project_id UUID NOT NULL REFERENCES projects(id) ON DELETE CASCADE,
///     assigned_to UUID REFERENCES users(id) ON DELETE SET NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use uuid::Uuid;

use super::user::UserSummary;
use crate::pagination::SortOrder;

/// Task workflow status
///
/// Free-form within the enum: any permitted value is settable at any
/// time by an authorized actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_status", rename_all = "snake_case")]
#[serde(rename_all = "kebab-case")]
pub enum TaskStatus {
    Todo,
    InProgress,
    Completed,
}

impl Default for TaskStatus {
    fn default() -> Self {
        TaskStatus::Todo
    }
}

/// Task priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "task_priority", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
}

impl Default for TaskPriority {
    fn default() -> Self {
        TaskPriority::Medium
    }
}

/// Sortable columns for task listings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskSort {
    Title,
    Status,
    Priority,
    CreatedAt,
    UpdatedAt,
}

impl TaskSort {
    /// Parses a wire-format sort key
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "title" => Some(TaskSort::Title),
            "status" => Some(TaskSort::Status),
            "priority" => Some(TaskSort::Priority),
            "createdAt" | "created_at" => Some(TaskSort::CreatedAt),
            "updatedAt" | "updated_at" => Some(TaskSort::UpdatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            TaskSort::Title => "title",
            TaskSort::Status => "status",
            TaskSort::Priority => "priority",
            TaskSort::CreatedAt => "created_at",
            TaskSort::UpdatedAt => "updated_at",
        }
    }
}

impl Default for TaskSort {
    fn default() -> Self {
        TaskSort::CreatedAt
    }
}

/// Task model as stored
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Owning project
    pub project_id: Uuid,

    /// Optional assignee (must be a member of the project)
    pub assigned_to: Option<Uuid>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Task joined with its assignee's user record, for responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskDetail {
    /// Unique task ID
    pub id: Uuid,

    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Workflow status
    pub status: TaskStatus,

    /// Priority
    pub priority: TaskPriority,

    /// Owning project
    pub project_id: Uuid,

    /// Assignee's user record, if assigned
    pub assignee: Option<UserSummary>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct TaskDetailRow {
    id: Uuid,
    title: String,
    description: Option<String>,
    status: TaskStatus,
    priority: TaskPriority,
    project_id: Uuid,
    assigned_to: Option<Uuid>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    assignee_username: Option<String>,
    assignee_email: Option<String>,
    assignee_first_name: Option<String>,
    assignee_last_name: Option<String>,
}

impl From<TaskDetailRow> for TaskDetail {
    fn from(row: TaskDetailRow) -> Self {
        let assignee = match (row.assigned_to, row.assignee_username, row.assignee_email) {
            (Some(id), Some(username), Some(email)) => Some(UserSummary {
                id,
                username,
                email,
                first_name: row.assignee_first_name,
                last_name: row.assignee_last_name,
            }),
            _ => None,
        };

        Self {
            id: row.id,
            title: row.title,
            description: row.description,
            status: row.status,
            priority: row.priority,
            project_id: row.project_id,
            assignee,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Input for creating a new task
#[derive(Debug, Clone)]
pub struct CreateTask {
    /// Task title
    pub title: String,

    /// Optional description
    pub description: Option<String>,

    /// Initial status (defaults to Todo)
    pub status: TaskStatus,

    /// Priority (defaults to Medium)
    pub priority: TaskPriority,

    /// Owning project
    pub project_id: Uuid,

    /// Optional assignee
    pub assigned_to: Option<Uuid>,
}

/// Input for updating a task
///
/// `assigned_to` is doubly optional: `None` leaves the assignee alone,
/// `Some(None)` clears it, `Some(Some(id))` reassigns.
#[derive(Debug, Clone, Default)]
pub struct UpdateTask {
    /// New title
    pub title: Option<String>,

    /// New description
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// Assignee change, if any
    pub assigned_to: Option<Option<Uuid>>,
}

const DETAIL_COLUMNS: &str = r#"
    t.id, t.title, t.description, t.status, t.priority, t.project_id,
    t.assigned_to, t.created_at, t.updated_at,
    u.username AS assignee_username, u.email AS assignee_email,
    u.first_name AS assignee_first_name, u.last_name AS assignee_last_name
"#;

impl Task {
    /// Creates a new task
    ///
    /// Assignee validation happens in the service layer before this runs.
    pub async fn create(pool: &PgPool, data: CreateTask) -> Result<Self, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, status, priority, project_id, assigned_to)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, title, description, status, priority, project_id,
                      assigned_to, created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(data.project_id)
        .bind(data.assigned_to)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, status, priority, project_id,
                   assigned_to, created_at, updated_at
            FROM tasks
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task joined with its assignee
    pub async fn find_detail(pool: &PgPool, id: Uuid) -> Result<Option<TaskDetail>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM tasks t
            LEFT JOIN users u ON u.id = t.assigned_to
            WHERE t.id = $1
            "#
        );

        let row = sqlx::query_as::<_, TaskDetailRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(row.map(TaskDetail::from))
    }

    /// Lists one page of a project's tasks joined with assignees
    ///
    /// `search` filters by case-insensitive substring match on the title.
    pub async fn list_for_project(
        pool: &PgPool,
        project_id: Uuid,
        search: Option<&str>,
        sort: TaskSort,
        order: SortOrder,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<TaskDetail>, sqlx::Error> {
        let query = format!(
            r#"
            SELECT {DETAIL_COLUMNS}
            FROM tasks t
            LEFT JOIN users u ON u.id = t.assigned_to
            WHERE t.project_id = $1
              AND ($2::text IS NULL OR t.title ILIKE '%' || $2 || '%')
            ORDER BY t.{} {}
            LIMIT $3 OFFSET $4
            "#,
            sort.column(),
            order.as_sql()
        );

        let rows = sqlx::query_as::<_, TaskDetailRow>(&query)
            .bind(project_id)
            .bind(search)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await?;

        Ok(rows.into_iter().map(TaskDetail::from).collect())
    }

    /// Counts a project's tasks, honoring the same filter
    pub async fn count_for_project(
        pool: &PgPool,
        project_id: Uuid,
        search: Option<&str>,
    ) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*)
            FROM tasks
            WHERE project_id = $1
              AND ($2::text IS NULL OR title ILIKE '%' || $2 || '%')
            "#,
        )
        .bind(project_id)
        .bind(search)
        .fetch_one(pool)
        .await?;

        Ok(count)
    }

    /// Applies a partial update and returns the updated row
    ///
    /// The assignee column is only touched when the caller explicitly
    /// provided a value (including an explicit null to unassign).
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        data: UpdateTask,
    ) -> Result<Option<Self>, sqlx::Error> {
        let touch_assignee = data.assigned_to.is_some();
        let new_assignee = data.assigned_to.flatten();

        let task = sqlx::query_as::<_, Task>(
            r#"
            UPDATE tasks
            SET title = COALESCE($2, title),
                description = COALESCE($3, description),
                status = COALESCE($4, status),
                priority = COALESCE($5, priority),
                assigned_to = CASE WHEN $6 THEN $7 ELSE assigned_to END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, description, status, priority, project_id,
                      assigned_to, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(data.title)
        .bind(data.description)
        .bind(data.status)
        .bind(data.priority)
        .bind(touch_assignee)
        .bind(new_assignee)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Deletes a task; comments cascade in the store
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
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
            serde_json::to_string(&TaskStatus::InProgress).unwrap(),
            "\"in-progress\""
        );

        let parsed: TaskStatus = serde_json::from_str("\"in-progress\"").unwrap();
        assert_eq!(parsed, TaskStatus::InProgress);

        assert!(serde_json::from_str::<TaskStatus>("\"blocked\"").is_err());
    }

    #[test]
    fn test_priority_wire_format() {
        assert_eq!(serde_json::to_string(&TaskPriority::High).unwrap(), "\"high\"");
        assert!(serde_json::from_str::<TaskPriority>("\"urgent\"").is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(TaskStatus::default(), TaskStatus::Todo);
        assert_eq!(TaskPriority::default(), TaskPriority::Medium);
        assert_eq!(TaskSort::default(), TaskSort::CreatedAt);
    }

    #[test]
    fn test_sort_parse_whitelist() {
        assert_eq!(TaskSort::parse("priority"), Some(TaskSort::Priority));
        assert_eq!(TaskSort::parse("updatedAt"), Some(TaskSort::UpdatedAt));
        assert_eq!(TaskSort::parse("assigned_to"), None);
    }

    #[test]
    fn test_detail_row_without_assignee() {
        let row = TaskDetailRow {
            id: Uuid::new_v4(),
            title: "Ship it".to_string(),
            description: None,
            status: TaskStatus::Todo,
            priority: TaskPriority::Medium,
            project_id: Uuid::new_v4(),
            assigned_to: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            assignee_username: None,
            assignee_email: None,
            assignee_first_name: None,
            assignee_last_name: None,
        };

        let detail = TaskDetail::from(row);
        assert!(detail.assignee.is_none());
    }

    #[test]
    fn test_detail_row_with_assignee() {
        let assignee_id = Uuid::new_v4();
        let row = TaskDetailRow {
            id: Uuid::new_v4(),
            title: "Ship it".to_string(),
            description: None,
            status: TaskStatus::InProgress,
            priority: TaskPriority::High,
            project_id: Uuid::new_v4(),
            assigned_to: Some(assignee_id),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            assignee_username: Some("jdoe".to_string()),
            assignee_email: Some("jdoe@example.com".to_string()),
            assignee_first_name: None,
            assignee_last_name: None,
        };

        let detail = TaskDetail::from(row);
        let assignee = detail.assignee.expect("assignee should be present");
        assert_eq!(assignee.id, assignee_id);
        assert_eq!(assignee.username, "jdoe");
    }
}
