//! Storage collaborator contracts.
//!
//! The engine only ever reads records, hands back partial-field payloads,
//! and appends history entries; whatever sits behind these traits (a
//! tabular SaaS backend, a database, a test double) owns atomicity per
//! record and the freshness of `updated_at`.

use async_trait::async_trait;

use intake_core::error::CoreResult;
use intake_core::history::{NewHistoryRecord, ProjectHistory};
use intake_core::project::{NewProjectRecord, Project, ProjectPatch};
use intake_core::types::RecordId;

use crate::query::{ProjectListParams, ProjectPage};

/// CRUD-plus-list access to project records.
///
/// Implementations must apply `update` atomically per record: two
/// concurrent patches to the same project may interleave in either order,
/// but a reader never observes half a patch. Call sites that change status
/// are expected to re-fetch via [`get`](ProjectStore::get) immediately
/// before planning a transition, so a stale read surfaces as an illegal
/// transition instead of silently clobbering a concurrent change.
#[async_trait]
pub trait ProjectStore: Send + Sync {
    /// Insert a new project, minting its id and timestamps.
    async fn create(&self, record: NewProjectRecord) -> CoreResult<Project>;

    /// Fetch a project by id. `Ok(None)` when absent.
    async fn get(&self, id: &RecordId) -> CoreResult<Option<Project>>;

    /// Apply the non-`None` fields of `patch` and refresh `updated_at`.
    /// Returns the updated record, or `Ok(None)` when absent.
    async fn update(&self, id: &RecordId, patch: ProjectPatch) -> CoreResult<Option<Project>>;

    /// Remove a project record. Returns `true` if a record was removed.
    /// History entries for the project are left in place.
    async fn delete(&self, id: &RecordId) -> CoreResult<bool>;

    /// List projects matching `params`, sorted and paginated.
    async fn list(&self, params: &ProjectListParams) -> CoreResult<ProjectPage>;
}

/// Append-only history trail.
#[async_trait]
pub trait HistoryStore: Send + Sync {
    /// Append an entry, minting its id and timestamp.
    async fn append(&self, entry: NewHistoryRecord) -> CoreResult<ProjectHistory>;

    /// All entries for one project, oldest first.
    async fn list_for_project(&self, project_id: &RecordId) -> CoreResult<Vec<ProjectHistory>>;
}
