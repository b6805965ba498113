/// Task endpoints
///
/// # Endpoints
///
/// - `POST /projects/:projectId/tasks` - Create a task (any member)
/// - `GET /projects/:projectId/tasks` - List a project's tasks (paginated)
/// - `GET /tasks/:id` - Fetch one task with its assignee
/// - `PUT /tasks/:id` - Update a task (any member)
/// - `DELETE /tasks/:id` - Delete a task (admin+)

use crate::{
    app::AppState,
    error::{validation_details, ApiResult},
    routes::MessageResponse,
};
use crate::extract::{Json, Query};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;
use validator::Validate;
use worklane_shared::{
    auth::middleware::AuthContext,
    models::task::{CreateTask, TaskDetail, TaskPriority, TaskStatus, UpdateTask},
    pagination::{ListParams, Page},
    services::tasks,
};

/// Task creation request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Task title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    /// Optional description
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// Initial status (defaults to "todo")
    #[serde(default)]
    pub status: TaskStatus,

    /// Priority (defaults to "medium")
    #[serde(default)]
    pub priority: TaskPriority,

    /// Optional assignee; must be a member of the project
    pub assigned_to: Option<Uuid>,
}

/// Task update request; only supplied fields are written
///
/// `assignedTo` distinguishes "absent" from "explicit null": omitting the
/// field leaves the assignee alone, sending `null` clears it.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// New title
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    /// New description
    #[validate(length(max = 5000, message = "Description must be at most 5000 characters"))]
    pub description: Option<String>,

    /// New status
    pub status: Option<TaskStatus>,

    /// New priority
    pub priority: Option<TaskPriority>,

    /// Assignee change: omitted = keep, null = clear, id = reassign
    #[serde(default, deserialize_with = "double_option")]
    pub assigned_to: Option<Option<Uuid>>,
}

/// Deserializes a present-but-possibly-null field into `Some(Option<T>)`
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Create a task in a project
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the assignee is not a
///   member of the project
/// - `404 Not Found`: Project absent or requester not a member
pub async fn create_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<TaskDetail>)> {
    req.validate().map_err(|e| validation_details(&e))?;

    let task = tasks::create(
        &state.db,
        auth.user_id,
        project_id,
        CreateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            project_id,
            assigned_to: req.assigned_to,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(task)))
}

/// List a project's tasks
///
/// Supports `page`, `limit`, `search` (title substring), `sort`
/// (title/status/priority/createdAt/updatedAt), and `order` (asc/desc).
pub async fn list_tasks(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Page<TaskDetail>>> {
    let page = tasks::list(&state.db, auth.user_id, project_id, &params).await?;
    Ok(Json(page))
}

/// Fetch one task with its assignee
pub async fn get_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<TaskDetail>> {
    let task = tasks::get(&state.db, auth.user_id, id).await?;
    Ok(Json(task))
}

/// Update a task (any member of its project)
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed, or the new assignee is not a
///   member of the project
/// - `404 Not Found`: Task absent or requester not a member
pub async fn update_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<TaskDetail>> {
    req.validate().map_err(|e| validation_details(&e))?;

    let task = tasks::update(
        &state.db,
        auth.user_id,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            status: req.status,
            priority: req.priority,
            assigned_to: req.assigned_to,
        },
    )
    .await?;

    Ok(Json(task))
}

/// Delete a task (admin+ of its project)
pub async fn delete_task(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    tasks::delete(&state.db, auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Task deleted successfully")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_assignee_stays_untouched() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"title": "New title"}"#).unwrap();
        assert_eq!(req.assigned_to, None);
    }

    #[test]
    fn test_null_assignee_clears() {
        let req: UpdateTaskRequest = serde_json::from_str(r#"{"assignedTo": null}"#).unwrap();
        assert_eq!(req.assigned_to, Some(None));
    }

    #[test]
    fn test_assignee_id_reassigns() {
        let id = Uuid::new_v4();
        let body = format!(r#"{{"assignedTo": "{}"}}"#, id);
        let req: UpdateTaskRequest = serde_json::from_str(&body).unwrap();
        assert_eq!(req.assigned_to, Some(Some(id)));
    }

    #[test]
    fn test_kebab_case_status_accepted() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"status": "in-progress"}"#).unwrap();
        assert_eq!(req.status, Some(TaskStatus::InProgress));
    }
}
