/// Authorization policy
///
/// Pure decision logic over three facts: the requester's identity, the
/// target project's membership roster, and the requested action. Every
/// domain service consults this module before a mutation or broad read,
/// and short-circuits before touching unrelated data when the check
/// fails.
///
/// # Permission model
///
/// 1. **Membership**: the requester must hold a membership row for the
///    project — reads by non-members report the project as absent rather
///    than forbidden, so membership checks never leak existence.
/// 2. **Role**: each action requires a minimum [`ProjectRole`]
///    (Owner > Admin > Member).
///
/// Two rules live outside the pure table because they depend on more
/// than (role, action): self-removal from a team is always allowed, and
/// a comment's author may always delete it. Their owning services encode
/// those short-circuits and fall through to this module otherwise.
///
/// # Example
///
/// ```no_run
/// use worklane_shared::policy::{require_action, ProjectAction};
/// use sqlx::PgPool;
/// use uuid::Uuid;
///
/// # async fn example(pool: PgPool, project_id: Uuid, user_id: Uuid)
/// #     -> Result<(), worklane_shared::error::ServiceError> {
/// // Errors with "Project not found" for non-members, Forbidden for
/// // members whose role is insufficient.
/// require_action(&pool, project_id, user_id, ProjectAction::UpdateProject, "Project").await?;
/// # Ok(())
/// # }
/// ```

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ServiceError;
use crate::models::membership::{Membership, ProjectRole};

/// Protected operations scoped to a project
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectAction {
    /// Read the project, its tasks, or its roster
    ViewProject,

    /// Create a task inside the project
    CreateTask,

    /// Update a task inside the project
    UpdateTask,

    /// Delete a task inside the project
    DeleteTask,

    /// Comment on a task inside the project
    AddComment,

    /// Delete another member's comment
    ModerateComments,

    /// Update the project itself
    UpdateProject,

    /// Delete the project
    DeleteProject,

    /// Add or remove team members
    ManageTeam,
}

impl ProjectAction {
    /// Minimum role required for this action
    pub fn required_role(&self) -> ProjectRole {
        match self {
            ProjectAction::ViewProject
            | ProjectAction::CreateTask
            | ProjectAction::UpdateTask
            | ProjectAction::AddComment => ProjectRole::Member,

            ProjectAction::DeleteTask
            | ProjectAction::ModerateComments
            | ProjectAction::UpdateProject
            | ProjectAction::ManageTeam => ProjectRole::Admin,

            ProjectAction::DeleteProject => ProjectRole::Owner,
        }
    }
}

/// Pure allow/deny decision for a role performing an action
pub fn allows(role: ProjectRole, action: ProjectAction) -> bool {
    role.has_permission(&action.required_role())
}

/// Requires that the user holds any membership for the project
///
/// `resource` names what the caller was asked for ("Project", "Task",
/// ...) so a denial on `/tasks/:id` reads "Task not found" rather than
/// naming the project the caller never mentioned.
///
/// # Errors
///
/// Returns `ServiceError::NotFound` when the user is not a member. The
/// same error is used whether or not the resource exists, so the check
/// does not leak existence to outsiders.
pub async fn require_membership(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
    resource: &str,
) -> Result<Membership, ServiceError> {
    Membership::find(pool, project_id, user_id)
        .await?
        .ok_or_else(|| ServiceError::not_found(resource))
}

/// Requires that the user's role permits the action
///
/// # Errors
///
/// - `ServiceError::NotFound` when the user is not a member (existence
///   hidden behind the named `resource`)
/// - `ServiceError::Forbidden` when the user is a member but the role is
///   insufficient
pub async fn require_action(
    pool: &PgPool,
    project_id: Uuid,
    user_id: Uuid,
    action: ProjectAction,
    resource: &str,
) -> Result<Membership, ServiceError> {
    let membership = require_membership(pool, project_id, user_id, resource).await?;

    if !allows(membership.role, action) {
        return Err(ServiceError::Forbidden(
            "You do not have permission to perform this action".to_string(),
        ));
    }

    Ok(membership)
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_ACTIONS: [ProjectAction; 9] = [
        ProjectAction::ViewProject,
        ProjectAction::CreateTask,
        ProjectAction::UpdateTask,
        ProjectAction::DeleteTask,
        ProjectAction::AddComment,
        ProjectAction::ModerateComments,
        ProjectAction::UpdateProject,
        ProjectAction::DeleteProject,
        ProjectAction::ManageTeam,
    ];

    #[test]
    fn test_owner_allowed_everything() {
        for action in ALL_ACTIONS {
            assert!(allows(ProjectRole::Owner, action), "{:?}", action);
        }
    }

    #[test]
    fn test_admin_allowed_everything_except_project_deletion() {
        for action in ALL_ACTIONS {
            let expected = action != ProjectAction::DeleteProject;
            assert_eq!(allows(ProjectRole::Admin, action), expected, "{:?}", action);
        }
    }

    #[test]
    fn test_member_allowed_only_basic_work() {
        let allowed = [
            ProjectAction::ViewProject,
            ProjectAction::CreateTask,
            ProjectAction::UpdateTask,
            ProjectAction::AddComment,
        ];

        for action in ALL_ACTIONS {
            let expected = allowed.contains(&action);
            assert_eq!(allows(ProjectRole::Member, action), expected, "{:?}", action);
        }
    }

    #[test]
    fn test_required_roles() {
        assert_eq!(
            ProjectAction::DeleteProject.required_role(),
            ProjectRole::Owner
        );
        assert_eq!(ProjectAction::ManageTeam.required_role(), ProjectRole::Admin);
        assert_eq!(
            ProjectAction::ViewProject.required_role(),
            ProjectRole::Member
        );
    }
}
