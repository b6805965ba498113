/// Comment endpoints
///
/// # Endpoints
///
/// - `POST /tasks/:taskId/comments` - Comment on a task (any member)
/// - `GET /tasks/:taskId/comments` - List a task's comments (paginated)
/// - `DELETE /comments/:id` - Delete a comment (author, or admin+)

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
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;
use worklane_shared::{
    auth::middleware::AuthContext,
    models::comment::CommentDetail,
    pagination::{ListParams, Page},
    services::comments,
};

/// Comment creation request
#[derive(Debug, Deserialize, Validate)]
pub struct AddCommentRequest {
    /// Comment body
    #[validate(length(min = 1, max = 5000, message = "Content must be 1-5000 characters"))]
    pub content: String,
}

/// Add a comment to a task
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
/// - `404 Not Found`: Task absent or requester not a member of its
///   project
pub async fn add_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Json(req): Json<AddCommentRequest>,
) -> ApiResult<(StatusCode, Json<CommentDetail>)> {
    req.validate().map_err(|e| validation_details(&e))?;

    let comment = comments::add(&state.db, auth.user_id, task_id, req.content).await?;

    Ok((StatusCode::CREATED, Json(comment)))
}

/// List a task's comments with their authors, oldest first
pub async fn list_comments(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(task_id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Page<CommentDetail>>> {
    let page = comments::list(&state.db, auth.user_id, task_id, &params).await?;
    Ok(Json(page))
}

/// Delete a comment
///
/// The author can always delete their own comment; anyone else needs an
/// owner or admin role in the owning project.
pub async fn delete_comment(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    comments::delete(&state.db, auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Comment deleted successfully")))
}
