//! Project entity model and DTOs.
//!
//! The entity mirrors the tracker's `projects` table in the tabular backend;
//! list-valued columns (`participant_ids`, `tags`) are JSON-encoded there,
//! which is a storage detail handled by the collaborator, not here.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::status::ProjectStatus;
use crate::types::{RecordId, Timestamp};

// ---------------------------------------------------------------------------
// Closed enumerations
// ---------------------------------------------------------------------------

/// Kind of work requested. Immutable after creation; claim eligibility
/// depends on it (developers may only claim data development work).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    DataDevelopment,
    SystemDevelopment,
}

impl ProjectType {
    pub fn as_str(self) -> &'static str {
        match self {
            ProjectType::DataDevelopment => "data_development",
            ProjectType::SystemDevelopment => "system_development",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "data_development" => Ok(ProjectType::DataDevelopment),
            "system_development" => Ok(ProjectType::SystemDevelopment),
            other => Err(CoreError::InvalidState(format!(
                "Unknown project type '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for ProjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Advisory priority. Unconstrained by the workflow; carried for display
/// and sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Urgent => "urgent",
        }
    }

    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "urgent" => Ok(Priority::Urgent),
            other => Err(CoreError::InvalidState(format!(
                "Unknown priority '{other}'"
            ))),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Project entity
// ---------------------------------------------------------------------------

/// A project record as returned by the storage collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: RecordId,
    pub name: String,
    pub project_type: ProjectType,
    pub description: String,
    pub priority: Priority,
    pub status: ProjectStatus,

    pub submitter_id: RecordId,
    pub submitter_name: String,
    /// Set by claim or assign; never cleared afterwards.
    pub owner_id: Option<RecordId>,
    pub owner_name: Option<String>,
    /// Read access only; participants hold no transition authority.
    pub participant_ids: Vec<RecordId>,

    pub estimated_start_date: Option<Timestamp>,
    pub estimated_end_date: Option<Timestamp>,
    /// Stamped exactly once, at the first confirmed start of work.
    pub actual_start_date: Option<Timestamp>,
    /// Stamped on completion; refreshed if the project is reopened and
    /// completed again.
    pub actual_end_date: Option<Timestamp>,

    pub remarks: Option<String>,
    pub tags: Vec<String>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Project {
    /// Whether `actor_id` is the current owner.
    pub fn is_owned_by(&self, actor_id: &str) -> bool {
        self.owner_id.as_deref() == Some(actor_id)
    }

    /// Whether `actor_id` submitted this project.
    pub fn is_submitted_by(&self, actor_id: &str) -> bool {
        self.submitter_id == actor_id
    }

    /// Whether `actor_id` is listed as a participant.
    pub fn has_participant(&self, actor_id: &str) -> bool {
        self.participant_ids.iter().any(|id| id == actor_id)
    }
}

// ---------------------------------------------------------------------------
// DTOs
// ---------------------------------------------------------------------------

/// Fields supplied by the submitter when creating a project.
///
/// Status, submitter, and ownership are not caller-controlled: new projects
/// always start `submitted` with no owner.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProject {
    pub name: String,
    pub project_type: ProjectType,
    pub description: String,
    pub priority: Priority,
    #[serde(default)]
    pub participant_ids: Vec<RecordId>,
    pub estimated_start_date: Option<Timestamp>,
    pub estimated_end_date: Option<Timestamp>,
    pub remarks: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Patch DTO for plain edits. All fields optional; only non-`None` fields
/// are applied.
///
/// Deliberately excludes `project_type` (immutable), the submitter fields,
/// `status`, ownership, and the actual dates -- those move only through the
/// dedicated workflow operations (claim, assign, status change).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProject {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub participant_ids: Option<Vec<RecordId>>,
    pub estimated_start_date: Option<Timestamp>,
    pub estimated_end_date: Option<Timestamp>,
    pub remarks: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl UpdateProject {
    /// Names of the fields this patch touches, recorded on history entries.
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.name.is_some() {
            fields.push("name");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.priority.is_some() {
            fields.push("priority");
        }
        if self.participant_ids.is_some() {
            fields.push("participant_ids");
        }
        if self.estimated_start_date.is_some() {
            fields.push("estimated_start_date");
        }
        if self.estimated_end_date.is_some() {
            fields.push("estimated_end_date");
        }
        if self.remarks.is_some() {
            fields.push("remarks");
        }
        if self.tags.is_some() {
            fields.push("tags");
        }
        fields
    }

    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }
}

/// The full record handed to `ProjectStore::create`. Built by the service
/// from a validated [`CreateProject`] plus the submitting actor; the store
/// mints `id`, `created_at`, and `updated_at`.
#[derive(Debug, Clone)]
pub struct NewProjectRecord {
    pub name: String,
    pub project_type: ProjectType,
    pub description: String,
    pub priority: Priority,
    pub status: ProjectStatus,
    pub submitter_id: RecordId,
    pub submitter_name: String,
    pub participant_ids: Vec<RecordId>,
    pub estimated_start_date: Option<Timestamp>,
    pub estimated_end_date: Option<Timestamp>,
    pub remarks: Option<String>,
    pub tags: Vec<String>,
}

/// The partial-fields payload handed to `ProjectStore::update`.
///
/// This is the only shape the engine ever persists through: every workflow
/// operation reduces to one `ProjectPatch`. The store applies non-`None`
/// fields atomically per record and refreshes `updated_at`.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<ProjectStatus>,
    pub owner_id: Option<RecordId>,
    pub owner_name: Option<String>,
    pub participant_ids: Option<Vec<RecordId>>,
    pub estimated_start_date: Option<Timestamp>,
    pub estimated_end_date: Option<Timestamp>,
    pub actual_start_date: Option<Timestamp>,
    pub actual_end_date: Option<Timestamp>,
    pub remarks: Option<String>,
    pub tags: Option<Vec<String>>,
}

impl From<UpdateProject> for ProjectPatch {
    fn from(update: UpdateProject) -> Self {
        ProjectPatch {
            name: update.name,
            description: update.description,
            priority: update.priority,
            participant_ids: update.participant_ids,
            estimated_start_date: update.estimated_start_date,
            estimated_end_date: update.estimated_end_date,
            remarks: update.remarks,
            tags: update.tags,
            ..ProjectPatch::default()
        }
    }
}

impl From<crate::status::StatusChange> for ProjectPatch {
    fn from(change: crate::status::StatusChange) -> Self {
        ProjectPatch {
            status: Some(change.status),
            actual_start_date: change.actual_start_date,
            actual_end_date: change.actual_end_date,
            ..ProjectPatch::default()
        }
    }
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

#[cfg(test)]
impl Project {
    /// A data-development project in its initial state, owned by nobody.
    pub fn fixture() -> Self {
        let now = chrono::Utc::now();
        Project {
            id: "rec-fixture".to_string(),
            name: "Customer churn dataset".to_string(),
            project_type: ProjectType::DataDevelopment,
            description: "Build the churn feature table".to_string(),
            priority: Priority::Medium,
            status: ProjectStatus::Submitted,
            submitter_id: "user-submitter".to_string(),
            submitter_name: "Sam Submitter".to_string(),
            owner_id: None,
            owner_name: None,
            participant_ids: Vec::new(),
            estimated_start_date: None,
            estimated_end_date: None,
            actual_start_date: None,
            actual_end_date: None,
            remarks: None,
            tags: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}
