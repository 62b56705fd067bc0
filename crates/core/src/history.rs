//! Project history entries and the action vocabulary.
//!
//! History records form an append-only trail; entries are immutable once
//! created (no `updated_at`) and survive deletion of the project they
//! describe.

use serde::{Deserialize, Serialize};

use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Action constants
// ---------------------------------------------------------------------------

/// Project was created.
pub const ACTION_CREATED: &str = "created";
/// Plain field edit outside the workflow.
pub const ACTION_UPDATED: &str = "updated";
/// A developer (or manager) claimed the project.
pub const ACTION_CLAIMED: &str = "claimed";
/// A manager assigned the project to a developer.
pub const ACTION_ASSIGNED: &str = "assigned";
/// The project moved along the status graph.
pub const ACTION_STATUS_CHANGED: &str = "status_changed";
/// The project record was deleted.
pub const ACTION_DELETED: &str = "deleted";

/// All valid history actions.
pub const VALID_ACTIONS: &[&str] = &[
    ACTION_CREATED,
    ACTION_UPDATED,
    ACTION_CLAIMED,
    ACTION_ASSIGNED,
    ACTION_STATUS_CHANGED,
    ACTION_DELETED,
];

// ---------------------------------------------------------------------------
// History entity
// ---------------------------------------------------------------------------

/// A single history entry for a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectHistory {
    pub id: RecordId,
    pub project_id: RecordId,
    pub user_id: RecordId,
    pub user_name: String,
    /// One of [`VALID_ACTIONS`].
    pub action: String,
    /// JSON description of what changed (field names, from/to statuses).
    pub changes: serde_json::Value,
    pub created_at: Timestamp,
}

/// DTO for appending a history entry; the store mints `id` and
/// `created_at`.
#[derive(Debug, Clone)]
pub struct NewHistoryRecord {
    pub project_id: RecordId,
    pub user_id: RecordId,
    pub user_name: String,
    pub action: &'static str,
    pub changes: serde_json::Value,
}
