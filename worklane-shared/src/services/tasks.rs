/// Task service
///
/// Assignment is the cross-entity rule here: a task's assignee must be a
/// member of the task's project, checked against the roster at the time
/// of assignment. Reads and writes re-resolve the project from the task
/// row, never from caller input, so authorization always targets the
/// project the task actually belongs to.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::membership::Membership;
use crate::models::task::{CreateTask, Task, TaskDetail, TaskSort, UpdateTask};
use crate::models::user::User;
use crate::pagination::{ListParams, Page};
use crate::policy::{self, ProjectAction};

/// Creates a task in a project (any member)
///
/// # Errors
///
/// - `NotFound` when the actor is not a member of the project
/// - `InvalidReference` when the assignee doesn't exist or is not a
///   member of the project
pub async fn create(
    pool: &PgPool,
    actor: Uuid,
    project_id: Uuid,
    mut data: CreateTask,
) -> ServiceResult<TaskDetail> {
    policy::require_action(pool, project_id, actor, ProjectAction::CreateTask, "Project").await?;

    data.project_id = project_id;

    if let Some(assignee) = data.assigned_to {
        ensure_assignee_is_member(pool, project_id, assignee).await?;
    }

    let task = Task::create(pool, data).await?;

    tracing::info!(task_id = %task.id, project_id = %project_id, "Task created");

    // Re-fetch joined with the assignee so the response carries the
    // full user record.
    Task::find_detail(pool, task.id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))
}

/// Fetches a task with its assignee
pub async fn get(pool: &PgPool, actor: Uuid, task_id: Uuid) -> ServiceResult<TaskDetail> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    policy::require_membership(pool, task.project_id, actor, "Task").await?;

    Task::find_detail(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))
}

/// Lists a project's tasks with search, sorting, and pagination
pub async fn list(
    pool: &PgPool,
    actor: Uuid,
    project_id: Uuid,
    params: &ListParams,
) -> ServiceResult<Page<TaskDetail>> {
    policy::require_membership(pool, project_id, actor, "Project").await?;

    let request = params.page_request();
    let sort = params
        .sort
        .as_deref()
        .and_then(TaskSort::parse)
        .unwrap_or_default();
    let order = params.sort_order();
    let search = params.search_term();

    let total = Task::count_for_project(pool, project_id, search).await?;
    let tasks = Task::list_for_project(
        pool,
        project_id,
        search,
        sort,
        order,
        request.limit,
        request.offset(),
    )
    .await?;

    Ok(Page::new(tasks, request, total))
}

/// Applies a partial update to a task (any member)
///
/// # Errors
///
/// - `NotFound` when the task doesn't exist or the actor is not a member
/// - `InvalidReference` when a new assignee is not a member of the
///   project
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    task_id: Uuid,
    data: UpdateTask,
) -> ServiceResult<TaskDetail> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    policy::require_action(pool, task.project_id, actor, ProjectAction::UpdateTask, "Task").await?;

    if let Some(Some(assignee)) = data.assigned_to {
        ensure_assignee_is_member(pool, task.project_id, assignee).await?;
    }

    Task::update(pool, task_id, data)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    Task::find_detail(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))
}

/// Deletes a task (owner or admin); its comments go with it
pub async fn delete(pool: &PgPool, actor: Uuid, task_id: Uuid) -> ServiceResult<()> {
    let task = Task::find_by_id(pool, task_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Task"))?;

    policy::require_action(pool, task.project_id, actor, ProjectAction::DeleteTask, "Task").await?;

    if !Task::delete(pool, task_id).await? {
        return Err(ServiceError::not_found("Task"));
    }

    tracing::info!(task_id = %task_id, project_id = %task.project_id, "Task deleted");

    Ok(())
}

/// Validates that a prospective assignee belongs to the project
async fn ensure_assignee_is_member(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
) -> ServiceResult<()> {
    if !User::exists(pool, user_id).await? {
        return Err(ServiceError::InvalidReference(
            "Assignee does not exist".to_string(),
        ));
    }

    if Membership::find(pool, project_id, user_id).await?.is_none() {
        return Err(ServiceError::InvalidReference(
            "Assignee must be a member of this project".to_string(),
        ));
    }

    Ok(())
}
