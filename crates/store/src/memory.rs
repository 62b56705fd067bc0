//! In-memory implementation of the storage contracts.
//!
//! Backs the test suites and embedders that need no external backend. All
//! records live behind one `RwLock`, so updates are atomic per record and
//! `updated_at` is refreshed under the same write guard that applies the
//! patch.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use intake_core::error::CoreResult;
use intake_core::history::{NewHistoryRecord, ProjectHistory};
use intake_core::project::{NewProjectRecord, Project, ProjectPatch};
use intake_core::types::RecordId;

use crate::query::{ProjectListParams, ProjectPage, SortField, SortOrder};
use crate::store::{HistoryStore, ProjectStore};

#[derive(Default)]
struct Inner {
    projects: HashMap<RecordId, Project>,
    histories: Vec<ProjectHistory>,
}

/// Shared in-memory store. Cloning yields handles onto the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    inner: Arc<RwLock<Inner>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    fn mint_id() -> RecordId {
        Uuid::new_v4().to_string()
    }
}

// ---------------------------------------------------------------------------
// ProjectStore
// ---------------------------------------------------------------------------

#[async_trait]
impl ProjectStore for MemoryStore {
    async fn create(&self, record: NewProjectRecord) -> CoreResult<Project> {
        let now = Utc::now();
        let project = Project {
            id: Self::mint_id(),
            name: record.name,
            project_type: record.project_type,
            description: record.description,
            priority: record.priority,
            status: record.status,
            submitter_id: record.submitter_id,
            submitter_name: record.submitter_name,
            owner_id: None,
            owner_name: None,
            participant_ids: record.participant_ids,
            estimated_start_date: record.estimated_start_date,
            estimated_end_date: record.estimated_end_date,
            actual_start_date: None,
            actual_end_date: None,
            remarks: record.remarks,
            tags: record.tags,
            created_at: now,
            updated_at: now,
        };

        let mut inner = self.inner.write().await;
        inner.projects.insert(project.id.clone(), project.clone());
        tracing::debug!(project_id = %project.id, "Project record created");
        Ok(project)
    }

    async fn get(&self, id: &RecordId) -> CoreResult<Option<Project>> {
        let inner = self.inner.read().await;
        Ok(inner.projects.get(id).cloned())
    }

    async fn update(&self, id: &RecordId, patch: ProjectPatch) -> CoreResult<Option<Project>> {
        let mut inner = self.inner.write().await;
        let Some(project) = inner.projects.get_mut(id) else {
            return Ok(None);
        };

        if let Some(name) = patch.name {
            project.name = name;
        }
        if let Some(description) = patch.description {
            project.description = description;
        }
        if let Some(priority) = patch.priority {
            project.priority = priority;
        }
        if let Some(status) = patch.status {
            project.status = status;
        }
        if let Some(owner_id) = patch.owner_id {
            project.owner_id = Some(owner_id);
        }
        if let Some(owner_name) = patch.owner_name {
            project.owner_name = Some(owner_name);
        }
        if let Some(participant_ids) = patch.participant_ids {
            project.participant_ids = participant_ids;
        }
        if let Some(date) = patch.estimated_start_date {
            project.estimated_start_date = Some(date);
        }
        if let Some(date) = patch.estimated_end_date {
            project.estimated_end_date = Some(date);
        }
        if let Some(date) = patch.actual_start_date {
            project.actual_start_date = Some(date);
        }
        if let Some(date) = patch.actual_end_date {
            project.actual_end_date = Some(date);
        }
        if let Some(remarks) = patch.remarks {
            project.remarks = Some(remarks);
        }
        if let Some(tags) = patch.tags {
            project.tags = tags;
        }
        project.updated_at = Utc::now();

        Ok(Some(project.clone()))
    }

    async fn delete(&self, id: &RecordId) -> CoreResult<bool> {
        let mut inner = self.inner.write().await;
        let removed = inner.projects.remove(id).is_some();
        if removed {
            tracing::debug!(project_id = %id, "Project record deleted");
        }
        Ok(removed)
    }

    async fn list(&self, params: &ProjectListParams) -> CoreResult<ProjectPage> {
        let inner = self.inner.read().await;
        let mut matched: Vec<Project> = inner
            .projects
            .values()
            .filter(|p| params.matches(p))
            .cloned()
            .collect();

        let sort_by = params.sort_by.unwrap_or(SortField::CreatedAt);
        // Newest first by default, matching the backing table's listing.
        let sort_order = params.sort_order.unwrap_or(match sort_by {
            SortField::CreatedAt | SortField::UpdatedAt => SortOrder::Desc,
            _ => SortOrder::Asc,
        });

        matched.sort_by(|a, b| {
            let ordering = match sort_by {
                SortField::CreatedAt => a.created_at.cmp(&b.created_at),
                SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
                SortField::Name => a.name.cmp(&b.name),
                SortField::Priority => a.priority.cmp(&b.priority),
                SortField::Status => a.status.step_index().cmp(&b.status.step_index()),
            };
            match sort_order {
                SortOrder::Asc => ordering,
                SortOrder::Desc => ordering.reverse(),
            }
        });

        let total = matched.len();
        let page = params.page();
        let page_size = params.page_size();
        let items = matched
            .into_iter()
            .skip((page - 1) * page_size)
            .take(page_size)
            .collect();

        Ok(ProjectPage {
            items,
            total,
            page,
            page_size,
        })
    }
}

// ---------------------------------------------------------------------------
// HistoryStore
// ---------------------------------------------------------------------------

#[async_trait]
impl HistoryStore for MemoryStore {
    async fn append(&self, entry: NewHistoryRecord) -> CoreResult<ProjectHistory> {
        let record = ProjectHistory {
            id: Self::mint_id(),
            project_id: entry.project_id,
            user_id: entry.user_id,
            user_name: entry.user_name,
            action: entry.action.to_string(),
            changes: entry.changes,
            created_at: Utc::now(),
        };

        let mut inner = self.inner.write().await;
        inner.histories.push(record.clone());
        Ok(record)
    }

    async fn list_for_project(&self, project_id: &RecordId) -> CoreResult<Vec<ProjectHistory>> {
        let inner = self.inner.read().await;
        Ok(inner
            .histories
            .iter()
            .filter(|h| &h.project_id == project_id)
            .cloned()
            .collect())
    }
}

// ---------------------------------------------------------------------------
// Test helpers and tests
// ---------------------------------------------------------------------------

/// Build a project record for store-level tests.
#[cfg(test)]
pub(crate) fn test_project(id: &str) -> Project {
    use intake_core::project::{Priority, ProjectType};
    use intake_core::status::ProjectStatus;

    let now = Utc::now();
    Project {
        id: id.to_string(),
        name: format!("Project {id}"),
        project_type: ProjectType::DataDevelopment,
        description: "A test project".to_string(),
        priority: Priority::Medium,
        status: ProjectStatus::Submitted,
        submitter_id: "user-1".to_string(),
        submitter_name: "User One".to_string(),
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
