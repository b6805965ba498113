/// Team endpoints
///
/// # Endpoints
///
/// - `POST /projects/:projectId/teams` - Add a team member (admin+)
/// - `GET /projects/:projectId/teams` - List a project's roster (paginated)
/// - `DELETE /teams/:id` - Remove a team member (admin+, or self)

use crate::{app::AppState, error::ApiResult, routes::MessageResponse};
use crate::extract::{Json, Query};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension,
};
use serde::Deserialize;
use uuid::Uuid;
use worklane_shared::{
    auth::middleware::AuthContext,
    models::membership::{Membership, ProjectRole, TeamMember},
    pagination::{ListParams, Page},
    services::teams,
};

/// Team member addition request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamMemberRequest {
    /// The user to add
    pub user_id: Uuid,

    /// Role to assign (defaults to "member")
    #[serde(default)]
    pub role: ProjectRole,
}

/// Add a user to a project's team
///
/// # Errors
///
/// - `403 Forbidden`: Requester is a plain member
/// - `404 Not Found`: Project or target user absent, or requester not a
///   member
/// - `409 Conflict`: User already on the team
pub async fn add_team_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Json(req): Json<AddTeamMemberRequest>,
) -> ApiResult<(StatusCode, Json<Membership>)> {
    let membership =
        teams::add_member(&state.db, auth.user_id, project_id, req.user_id, req.role).await?;

    Ok((StatusCode::CREATED, Json(membership)))
}

/// List a project's roster with user records, oldest members first
pub async fn list_team_members(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(project_id): Path<Uuid>,
    Query(params): Query<ListParams>,
) -> ApiResult<Json<Page<TeamMember>>> {
    let page = teams::list_members(&state.db, auth.user_id, project_id, &params).await?;
    Ok(Json(page))
}

/// Remove a team member by membership ID
///
/// # Errors
///
/// - `403 Forbidden`: Plain member removing someone else
/// - `404 Not Found`: Membership absent or requester not a member
/// - `409 Conflict`: Target is the project's last owner
pub async fn remove_team_member(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthContext>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<MessageResponse>> {
    teams::remove_member(&state.db, auth.user_id, id).await?;
    Ok(Json(MessageResponse::new("Team member removed successfully")))
}
