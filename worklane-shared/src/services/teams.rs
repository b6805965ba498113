/// Team service: roster management
///
/// Removal enforces the minimum-owner invariant: a project must retain
/// at least one owner membership at all times. The owner count is
/// recomputed at removal time inside the same transaction as the delete,
/// with the roster rows locked, so two concurrent removals in the
/// two-owner case cannot both succeed.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{ServiceError, ServiceResult};
use crate::models::membership::{CreateMembership, Membership, ProjectRole, TeamMember};
use crate::models::user::User;
use crate::pagination::{ListParams, Page};
use crate::policy::{self, allows, ProjectAction};

/// Adds a user to a project's team (owner or admin)
///
/// # Errors
///
/// - `NotFound` when the target user doesn't exist (or the actor is not
///   a member of the project)
/// - `Conflict` when the user is already on the team
pub async fn add_member(
    pool: &PgPool,
    actor: Uuid,
    project_id: Uuid,
    user_id: Uuid,
    role: ProjectRole,
) -> ServiceResult<Membership> {
    policy::require_action(pool, project_id, actor, ProjectAction::ManageTeam, "Project").await?;

    if !User::exists(pool, user_id).await? {
        return Err(ServiceError::not_found("User"));
    }

    let result = Membership::create(
        pool,
        CreateMembership {
            project_id,
            user_id,
            role,
        },
    )
    .await;

    match result {
        Ok(membership) => {
            tracing::info!(
                project_id = %project_id,
                user_id = %user_id,
                role = role.as_str(),
                "Team member added"
            );
            Ok(membership)
        }
        Err(sqlx::Error::Database(db_err))
            if db_err.constraint().is_some_and(|c| c.contains("project_id_user_id")) =>
        {
            Err(ServiceError::Conflict(
                "User is already a member of this project".to_string(),
            ))
        }
        Err(e) => Err(e.into()),
    }
}

/// Lists a project's roster, oldest members first
pub async fn list_members(
    pool: &PgPool,
    actor: Uuid,
    project_id: Uuid,
    params: &ListParams,
) -> ServiceResult<Page<TeamMember>> {
    policy::require_membership(pool, project_id, actor, "Project").await?;

    let request = params.page_request();
    let total = Membership::count_for_project(pool, project_id).await?;
    let members =
        Membership::list_for_project(pool, project_id, request.limit, request.offset()).await?;

    Ok(Page::new(members, request, total))
}

/// Removes a membership by row ID
///
/// Allowed for owners/admins of the project, or for any member removing
/// themselves. Removing the last owner is forbidden unconditionally.
///
/// # Errors
///
/// - `NotFound` when the membership doesn't exist or the actor is not a
///   member of its project
/// - `Forbidden` when a plain member tries to remove someone else
/// - `Conflict` when the target is the project's last owner
pub async fn remove_member(pool: &PgPool, actor: Uuid, membership_id: Uuid) -> ServiceResult<()> {
    let target = Membership::find_by_id(pool, membership_id)
        .await?
        .ok_or_else(|| ServiceError::not_found("Team member"))?;

    let actor_membership =
        policy::require_membership(pool, target.project_id, actor, "Team member").await?;

    let removing_self = target.user_id == actor;
    if !removing_self && !allows(actor_membership.role, ProjectAction::ManageTeam) {
        return Err(ServiceError::Forbidden(
            "You do not have permission to remove this team member".to_string(),
        ));
    }

    // The owner count must hold at the moment of deletion, so both run
    // in one transaction over locked roster rows.
    let mut tx = pool.begin().await?;

    if target.role == ProjectRole::Owner {
        let owners = Membership::lock_and_count_owners(&mut *tx, target.project_id).await?;
        if owners <= 1 {
            return Err(ServiceError::Conflict(
                "Cannot remove the last owner of a project".to_string(),
            ));
        }
    }

    if !Membership::delete_by_id(&mut *tx, membership_id).await? {
        return Err(ServiceError::not_found("Team member"));
    }

    tx.commit().await?;

    tracing::info!(
        project_id = %target.project_id,
        user_id = %target.user_id,
        removed_by = %actor,
        "Team member removed"
    );

    Ok(())
}
