//! Project status state machine.
//!
//! Defines the closed set of lifecycle statuses, the legal transitions
//! between them, and the timestamp side effects each transition implies.
//! Authorization is a separate concern (see [`crate::permission`]); the
//! functions here answer only "is this edge in the graph" and "which fields
//! does taking it stamp".
//!
//! Lifecycle per project type:
//! - data development: `submitted` -> (developer claims) -> `pending_review`
//!   -> (manager confirms) -> `in_progress` -> `completed`
//! - system development: `submitted` -> (manager reviews) -> `pending_review`
//!   -> (manager assigns) -> `in_progress` -> `completed`

use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::project::Project;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// Status enumeration
// ---------------------------------------------------------------------------

/// Project lifecycle status. Closed enumeration; no other value is ever
/// stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    /// Initial status for a newly submitted project. Re-enterable via
    /// send-back from review.
    Submitted,
    /// Awaiting manager review (fresh submission) or claim confirmation
    /// (a developer has proposed ownership).
    PendingReview,
    /// Work is underway; an owner is responsible for execution.
    InProgress,
    /// Work is finished. Not terminal: completed projects may be reopened.
    Completed,
}

/// All valid statuses, in pipeline order.
pub const ALL_STATUSES: &[ProjectStatus] = &[
    ProjectStatus::Submitted,
    ProjectStatus::PendingReview,
    ProjectStatus::InProgress,
    ProjectStatus::Completed,
];

impl ProjectStatus {
    /// The stored string form, matching the tabular backend's values.
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectStatus::Submitted => "submitted",
            ProjectStatus::PendingReview => "pending_review",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
        }
    }

    /// Parse a stored status string. Unknown values are an upstream defect
    /// and fail closed with [`CoreError::InvalidState`].
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "submitted" => Ok(ProjectStatus::Submitted),
            "pending_review" => Ok(ProjectStatus::PendingReview),
            "in_progress" => Ok(ProjectStatus::InProgress),
            "completed" => Ok(ProjectStatus::Completed),
            other => Err(CoreError::InvalidState(format!(
                "Unknown project status '{other}'"
            ))),
        }
    }

    /// Zero-based position of the status in the four-stage pipeline, for
    /// step-style progress displays.
    pub fn step_index(self) -> usize {
        match self {
            ProjectStatus::Submitted => 0,
            ProjectStatus::PendingReview => 1,
            ProjectStatus::InProgress => 2,
            ProjectStatus::Completed => 3,
        }
    }
}

impl std::fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Transition graph
// ---------------------------------------------------------------------------

/// Returns the set of statuses that `from` may transition to.
///
/// Transition rules:
/// - `submitted`      -> `pending_review`
/// - `pending_review` -> `in_progress`, `submitted` (send back)
/// - `in_progress`    -> `completed`, `pending_review` (send back to review)
/// - `completed`      -> `in_progress` (reopen)
pub fn next_allowed(from: ProjectStatus) -> &'static [ProjectStatus] {
    match from {
        ProjectStatus::Submitted => &[ProjectStatus::PendingReview],
        ProjectStatus::PendingReview => {
            &[ProjectStatus::InProgress, ProjectStatus::Submitted]
        }
        ProjectStatus::InProgress => {
            &[ProjectStatus::Completed, ProjectStatus::PendingReview]
        }
        ProjectStatus::Completed => &[ProjectStatus::InProgress],
    }
}

/// Check whether the directed edge `from -> to` is in the transition table.
pub fn is_legal_transition(from: ProjectStatus, to: ProjectStatus) -> bool {
    next_allowed(from).contains(&to)
}

// ---------------------------------------------------------------------------
// Transition planning
// ---------------------------------------------------------------------------

/// The state-update descriptor produced by a legal transition: the new
/// status plus any derived timestamp fields. The caller persists it via the
/// storage collaborator; nothing here mutates state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange {
    pub status: ProjectStatus,
    /// Stamped only on the first `pending_review -> in_progress` transition.
    pub actual_start_date: Option<Timestamp>,
    /// Stamped on every entry into `completed`, always to the current time.
    pub actual_end_date: Option<Timestamp>,
}

/// Plan a status transition for `project` to `target`.
///
/// Fails with [`CoreError::IllegalTransition`] when `target` is not adjacent
/// to the project's current status. On success, computes the derived
/// timestamp fields:
///
/// - entering `in_progress` from `pending_review` stamps
///   `actual_start_date` to `start_date` (if supplied) or the current time,
///   unless a previous transition already stamped it; the field is set
///   exactly once over the project's lifetime.
/// - entering `completed` stamps `actual_end_date` to the current time.
///   A caller-supplied date is never honored here.
///
/// No authorization is checked; callers gate the request through
/// [`crate::permission`] first.
pub fn plan_transition(
    project: &Project,
    target: ProjectStatus,
    start_date: Option<Timestamp>,
) -> Result<StatusChange, CoreError> {
    let from = project.status;
    if !is_legal_transition(from, target) {
        return Err(CoreError::IllegalTransition { from, to: target });
    }

    let mut change = StatusChange {
        status: target,
        actual_start_date: None,
        actual_end_date: None,
    };

    match (from, target) {
        (ProjectStatus::PendingReview, ProjectStatus::InProgress) => {
            if project.actual_start_date.is_none() {
                change.actual_start_date = Some(start_date.unwrap_or_else(Utc::now));
            }
        }
        (ProjectStatus::InProgress, ProjectStatus::Completed) => {
            change.actual_end_date = Some(Utc::now());
        }
        _ => {}
    }

    Ok(change)
}

// ---------------------------------------------------------------------------
// Presentation labels
// ---------------------------------------------------------------------------

/// Human-readable action name for a transition, used for button and
/// confirmation text only; it has no effect on legality.
///
/// `has_owner` distinguishes confirming an existing claim from approving and
/// assigning when entering `in_progress` from `pending_review`. Edges
/// outside the transition table fall back to a generic label.
pub fn transition_label(
    from: ProjectStatus,
    to: ProjectStatus,
    has_owner: bool,
) -> &'static str {
    match (from, to) {
        (ProjectStatus::Submitted, ProjectStatus::PendingReview) => "submit for review",
        (ProjectStatus::PendingReview, ProjectStatus::InProgress) => {
            if has_owner {
                "confirm and start"
            } else {
                "approve and start"
            }
        }
        (ProjectStatus::PendingReview, ProjectStatus::Submitted) => "send back",
        (ProjectStatus::InProgress, ProjectStatus::Completed) => "complete",
        (ProjectStatus::InProgress, ProjectStatus::PendingReview) => "send back to review",
        (ProjectStatus::Completed, ProjectStatus::InProgress) => "reopen",
        _ => "change status",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
