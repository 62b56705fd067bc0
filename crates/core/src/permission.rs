//! Role/ownership authorization policy.
//!
//! Pure boolean predicates over `(project, actor, action)`. There is no
//! partial authorization: an action is permitted or it is not, and nothing
//! here mutates state. Callers surface denied actions as
//! [`CoreError::Forbidden`](crate::error::CoreError::Forbidden).

use serde::{Deserialize, Serialize};

use crate::actor::Actor;
use crate::project::{Project, ProjectType};
use crate::roles::Role;
use crate::status::{self, ProjectStatus};

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Every action the policy can decide. A flat tag, not a capability object;
/// dispatching [`can`] over it keeps the rule set in one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "target")]
pub enum Action {
    View,
    Edit,
    Claim,
    Assign,
    ChangeStatus(ProjectStatus),
    Delete,
    Review,
    Complete,
}

/// Decide whether `actor` may perform `action` on `project`.
pub fn can(project: &Project, actor: &Actor, action: Action) -> bool {
    match action {
        Action::View => can_view(project, actor),
        Action::Edit => can_edit(project, actor),
        Action::Claim => can_claim(project, actor),
        Action::Assign => can_assign(project, actor),
        Action::ChangeStatus(target) => can_change_status(project, actor, target),
        Action::Delete => can_delete(project, actor),
        Action::Review => can_review(project, actor),
        Action::Complete => can_complete(project, actor),
    }
}

// ---------------------------------------------------------------------------
// Per-action predicates
// ---------------------------------------------------------------------------

/// Managers see everything; otherwise visibility requires a relationship to
/// the project (owner, submitter, or participant).
pub fn can_view(project: &Project, actor: &Actor) -> bool {
    actor.role.is_manager()
        || project.is_owned_by(&actor.id)
        || project.is_submitted_by(&actor.id)
        || project.has_participant(&actor.id)
}

/// Managers edit any project. Developers edit projects they own. Plain
/// users may only touch their own submissions, and only before review.
pub fn can_edit(project: &Project, actor: &Actor) -> bool {
    if actor.role.is_manager() {
        return true;
    }
    if actor.role == Role::Developer && project.is_owned_by(&actor.id) {
        return true;
    }
    actor.role == Role::User
        && project.is_submitted_by(&actor.id)
        && project.status == ProjectStatus::Submitted
}

/// Claiming proposes ownership and requests review; it never starts work
/// directly.
///
/// Rules:
/// - only developers, project managers, and admins may claim;
/// - developers may only claim data development projects;
/// - the project must be unowned and still `submitted`.
pub fn can_claim(project: &Project, actor: &Actor) -> bool {
    if !matches!(
        actor.role,
        Role::Developer | Role::ProjectManager | Role::Admin
    ) {
        return false;
    }
    if actor.role == Role::Developer
        && project.project_type != ProjectType::DataDevelopment
    {
        return false;
    }
    if project.owner_id.is_some() {
        return false;
    }
    project.status == ProjectStatus::Submitted
}

/// Assignment is manager-driven and self-confirming: it sets the owner and
/// starts work in one step. Completed projects cannot be reassigned.
pub fn can_assign(project: &Project, actor: &Actor) -> bool {
    actor.role.is_manager() && project.status != ProjectStatus::Completed
}

/// Combined gate for a requested status change: the edge must be in the
/// transition table, and the actor must hold the authority that edge
/// demands.
pub fn can_change_status(project: &Project, actor: &Actor, target: ProjectStatus) -> bool {
    if !status::is_legal_transition(project.status, target) {
        return false;
    }

    let manager = actor.role.is_manager();
    let owner = project.is_owned_by(&actor.id);

    match (project.status, target) {
        // Moving a submission into review is a manager decision.
        (ProjectStatus::Submitted, ProjectStatus::PendingReview) => manager,
        // The owner may close out their own work.
        (ProjectStatus::InProgress, ProjectStatus::Completed) => manager || owner,
        // Every other legal edge: manager or current owner.
        _ => manager || owner,
    }
}

/// Deletion is reserved for admins, regardless of status.
pub fn can_delete(_project: &Project, actor: &Actor) -> bool {
    actor.role == Role::Admin
}

/// Reviewing covers both confirming a developer's claim and vetting a fresh
/// submission; either way it is manager work on a `pending_review` project.
pub fn can_review(project: &Project, actor: &Actor) -> bool {
    actor.role.is_manager() && project.status == ProjectStatus::PendingReview
}

/// Completion shortcut used by the UI's primary button; equivalent to the
/// `in_progress -> completed` status-change rule.
pub fn can_complete(project: &Project, actor: &Actor) -> bool {
    project.status == ProjectStatus::InProgress
        && (actor.role.is_manager() || project.is_owned_by(&actor.id))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
