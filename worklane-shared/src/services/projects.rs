/// Project service
///
/// Project creation is the one place two writes must land together: the
/// project row and the creator's owner membership. Both run inside a
/// single transaction so a failed second write never leaves an ownerless
/// project visible.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::membership::{CreateMembership, Membership, ProjectRole};
use crate::models::project::{CreateProject, Project, ProjectSort, ProjectStatus, UpdateProject};
use crate::pagination::{ListParams, Page};
use crate::policy::{self, ProjectAction};

/// Input for creating a project
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub description: Option<String>,
    pub status: ProjectStatus,
}

/// Creates a project and its owner membership atomically
///
/// After this returns, exactly one membership row with role `owner`
/// references the creator.
pub async fn create(pool: &PgPool, actor: Uuid, data: NewProject) -> ServiceResult<Project> {
    let mut tx = pool.begin().await?;

    let project = Project::create(
        &mut *tx,
        CreateProject {
            name: data.name,
            description: data.description,
            status: data.status,
            created_by: actor,
        },
    )
    .await?;

    Membership::create(
        &mut *tx,
        CreateMembership {
            project_id: project.id,
            user_id: actor,
            role: ProjectRole::Owner,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(project_id = %project.id, user_id = %actor, "Project created");

    Ok(project)
}

/// Lists projects the actor is a member of
///
/// Supports case-insensitive substring search on the name, whitelisted
/// sorting (default createdAt descending), and pagination. A user with
/// no memberships gets an empty page, not an error.
pub async fn list(pool: &PgPool, actor: Uuid, params: &ListParams) -> ServiceResult<Page<Project>> {
    let request = params.page_request();
    let sort = params
        .sort
        .as_deref()
        .and_then(ProjectSort::parse)
        .unwrap_or_default();
    let order = params.sort_order();
    let search = params.search_term();

    let total = Project::count_for_member(pool, actor, search).await?;
    let projects = Project::list_for_member(
        pool,
        actor,
        search,
        sort,
        order,
        request.limit,
        request.offset(),
    )
    .await?;

    Ok(Page::new(projects, request, total))
}

/// Fetches a project the actor is a member of
pub async fn get(pool: &PgPool, actor: Uuid, project_id: Uuid) -> ServiceResult<Project> {
    policy::require_membership(pool, project_id, actor, "Project").await?;

    Project::find_by_id(pool, project_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))
}

/// Updates a project (owner or admin)
pub async fn update(
    pool: &PgPool,
    actor: Uuid,
    project_id: Uuid,
    data: UpdateProject,
) -> ServiceResult<Project> {
    policy::require_action(pool, project_id, actor, ProjectAction::UpdateProject, "Project").await?;

    Project::update(pool, project_id, data)
        .await?
        .ok_or_else(|| ServiceError::not_found("Project"))
}

/// Deletes a project (owner only); tasks and memberships cascade
pub async fn delete(pool: &PgPool, actor: Uuid, project_id: Uuid) -> ServiceResult<()> {
    policy::require_action(pool, project_id, actor, ProjectAction::DeleteProject, "Project").await?;

    if !Project::delete(pool, project_id).await? {
        return Err(ServiceError::not_found("Project"));
    }

    tracing::info!(project_id = %project_id, user_id = %actor, "Project deleted");

    Ok(())
}
