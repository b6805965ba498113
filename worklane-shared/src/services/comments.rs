/// Comment service
///
/// Deletion has two authorization paths: the author may always delete
/// their own comment, and owners/admins of the owning project may delete
/// anyone's. The author path is checked first and never consults the
/// roster, so an author who has since left the project can still remove
/// their comment.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::comment::{Comment, CommentDetail, CreateComment};
use crate::models::task::Task;
use crate::models::user::{User, UserSummary};
use crate::pagination::{ListParams, Page};
use crate::policy::{self, ProjectAction};

/// Adds a comment to a task (any member of the task's project)
///
/// # Errors
///
/// `NotFound` when the task doesn't exist or the actor is not a member
/// of its project.
pub async fn add(
    pool: &PgPool,
    actor: Uuid,
    task_id: Uuid,
    content: String,
) -> ServiceResult<CommentDetail> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    policy::require_action(pool, task.project_id, actor, ProjectAction::AddComment, "Task").await?;

    let comment = Comment::create(
        pool,
        CreateComment {
            content,
            task_id,
            user_id: actor,
        },
    )
    .await?;

    tracing::info!(comment_id = %comment.id, task_id = %task_id, "Comment added");

    let author = User::find_by_id(pool, actor)
        .await?
        .ok_or_else(|| ServiceError::not_found("User"))?;

    Ok(CommentDetail {
        id: comment.id,
        content: comment.content,
        task_id: comment.task_id,
        author: UserSummary::from(&author),
        created_at: comment.created_at,
    })
}

/// Lists a task's comments with their authors, oldest first
pub async fn list(
    pool: &PgPool,
    actor: Uuid,
    task_id: Uuid,
    params: &ListParams,
) -> ServiceResult<Page<CommentDetail>> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    policy::require_membership(pool, task.project_id, actor, "Task").await?;

    let request = params.page_request();
    let total = Comment::count_for_task(pool, task_id).await?;
    let comments = Comment::list_for_task(pool, task_id, request.limit, request.offset()).await?;

    Ok(Page::new(comments, request, total))
}

/// Deletes a comment
///
/// Authors delete their own comments without any roster check; everyone
/// else needs an owner or admin role in the owning project.
pub async fn delete(pool: &PgPool, actor: Uuid, comment_id: Uuid) -> ServiceResult<()> {
    let comment = Comment::find_by_id(pool, comment_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Comment"))?;

    if comment.user_id != actor {
        let task = Task::find_by_id(pool, comment.task_id)
            .await?
            .ok_or_else(|| ServiceError::not_found("Comment"))?;

        policy::require_action(
            pool,
            task.project_id,
            actor,
            ProjectAction::ModerateComments,
            "Comment",
        )
        .await?;
    }

    if !Comment::delete(pool, comment_id).await? {
        return Err(ServiceError::not_found("Comment"));
    }

    tracing::info!(comment_id = %comment_id, user_id = %actor, "Comment deleted");

    Ok(())
}
