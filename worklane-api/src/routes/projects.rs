/// Project endpoints
///
/// # Endpoints
///
/// - `POST /projects` - Create a project (creator becomes owner)
/// - `GET /projects` - List the requester's projects (paginated)
/// - `GET /projects/:id` - Fetch one project
/// - `PUT /projects/:id` - Update a project (admin+)
/// - `DELETE /projects/:id` - Delete a project (owner only)

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
    models::project::{Project, ProjectStatus, UpdateProject},
    pagination::{ListParams, Page},
    services::projects::{self, NewProject},
};

/// Project creation request
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    /// Project name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: String,

    /// Optional description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// Initial status (defaults to "active")
    #[serde(default)]
    pub status: ProjectStatus,
}

/// Project update request; only supplied fields are written
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectRequest {
    /// New name
    #[validate(length(min = 1, max = 100, message = "Name must be 1-100 characters"))]
    pub name: Option<String>,

    /// New description
    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    /// New status
    pub status: Option<ProjectStatus>,
}

/// Create a project
///
/// The creator is recorded as `createdBy` and gets an owner membership in
/// the same transaction.
///
/// # Errors
///
/// - `400 Bad Request`: Validation failed
pub async fn create_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Json(req): Json<CreateProjectRequest>,
) -> ApiResult<(StatusCode, Json<Project>)> {
    req.validate().map_err(|e| validation_details(&e))?;

    let project = projects::create(
        &state.db,
        auth.user_id,
        NewProject {
            name: req.name,
            description: req.description,
            status: req.status,
        },
    )
    .await?;

    Ok((StatusCode::CREATED, Json(project)))
}

/// List the requester's projects
///
/// Supports `page`, `limit`, `search` (name substring), `sort`
/// (name/status/createdAt/updatedAt), and `order` (asc/desc).
pub async fn list_projects(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Page<Project>>> {
    let page = projects::list(&state.db, auth.user_id, &params).await?;
    Ok(Json(page))
}

/// Fetch one project
///
/// # Errors
///
/// - `404 Not Found`: Project absent, or the requester is not a member
pub async fn get_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Project>> {
    let project = projects::get(&state.db, auth.user_id, id).await?;
    Ok(Json(project))
}

/// Update a project (admin+)
///
/// # Errors
///
/// - `403 Forbidden`: Requester is a plain member
/// - `404 Not Found`: Project absent or requester not a member
pub async fn update_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
    Json(req): Json<UpdateProjectRequest>,
) -> ApiResult<Json<Project>> {
    req.validate().map_err(|e| validation_details(&e))?;

    let project = projects::update(
        &state.db,
        auth.user_id,
        id,
        UpdateProject {
            name: req.name,
            description: req.description,
            status: req.status,
        },
    )
    .await?;

    Ok(Json(project))
}

/// Delete a project (owner only); tasks and memberships cascade
///
/// # Errors
///
/// - `403 Forbidden`: Requester is not an owner
/// - `404 Not Found`: Project absent or requester not a member
pub async fn delete_project(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    projects::delete(&state.db, auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Project deleted successfully")))
}
