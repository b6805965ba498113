/// Comment model and database operations
///
/// Comments are authored notes attached to tasks. A comment is deletable
/// by its author unconditionally, or by an owner/admin of the owning
/// project (see `services::comments`).
///
/// # Schema
///
/// ```sql
/// CREATE TABLE comments (
///     id UUID PRIMARY KEY DEFAULT gen_random_uuid(),
///     content TEXT NOT NULL,
///     task_id UUID NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
///     user_id UUID NOT NULL REFERENCES users(id),
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;
use uuid::Uuid;

use super::user::UserSummary;

/// Comment model as stored
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment body
    pub content: String,

    /// The task this comment is attached to
    pub task_id: Uuid,

    /// Author reference
    pub user_id: Uuid,

    /// When the comment was written
    pub created_at: DateTime<Utc>,
}

/// Comment joined with its author's user record, for listings
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommentDetail {
    /// Unique comment ID
    pub id: Uuid,

    /// Comment body
    pub content: String,

    /// The task this comment is attached to
    pub task_id: Uuid,

    /// The author's user record
    pub author: UserSummary,

    /// When the comment was written
    pub created_at: DateTime<Utc>,
}

#[derive(sqlx::FromRow)]
struct CommentDetailRow {
    id: Uuid,
    content: String,
    task_id: Uuid,
    created_at: DateTime<Utc>,
    user_id: Uuid,
    username: String,
    email: String,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<CommentDetailRow> for CommentDetail {
    fn from(row: CommentDetailRow) -> Self {
        Self {
            id: row.id,
            content: row.content,
            task_id: row.task_id,
            author: UserSummary {
                id: row.user_id,
                username: row.username,
                email: row.email,
                first_name: row.first_name,
                last_name: row.last_name,
            },
            created_at: row.created_at,
        }
    }
}

/// Input for creating a comment
#[derive(Debug, Clone)]
pub struct CreateComment {
    /// Comment body
    pub content: String,

    /// The task to attach to
    pub task_id: Uuid,

    /// Author
    pub user_id: Uuid,
}

impl Comment {
    /// Creates a new comment
    pub async fn create(pool: &PgPool, data: CreateComment) -> Result<Self, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            INSERT INTO comments (content, task_id, user_id)
            VALUES ($1, $2, $3)
            RETURNING id, content, task_id, user_id, created_at
            "#,
        )
        .bind(data.content)
        .bind(data.task_id)
        .bind(data.user_id)
        .fetch_one(pool)
        .await?;

        Ok(comment)
    }

    /// Finds a comment by ID
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        let comment = sqlx::query_as::<_, Comment>(
            r#"
            SELECT id, content, task_id, user_id, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(comment)
    }

    /// Lists one page of a task's comments joined with their authors,
    /// oldest first
    pub async fn list_for_task(
        pool: &PgPool,
        task_id: Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<CommentDetail>, sqlx::Error> {
        let rows = sqlx::query_as::<_, CommentDetailRow>(
            r#"
            SELECT c.id, c.content, c.task_id, c.created_at,
                   u.id AS user_id, u.username, u.email, u.first_name, u.last_name
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.task_id = $1
            ORDER BY c.created_at ASC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(task_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(rows.into_iter().map(CommentDetail::from).collect())
    }

    /// Counts a task's comments
    pub async fn count_for_task(pool: &PgPool, task_id: Uuid) -> Result<i64, sqlx::Error> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE task_id = $1")
            .bind(task_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Deletes a comment
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
