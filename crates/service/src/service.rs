//! The project workflow controller.
//!
//! Each method handles one user-facing operation. Mutations re-fetch the
//! record immediately before planning a transition, so a stale status read
//! surfaces as an `IllegalTransition` instead of silently clobbering a
//! concurrent change (optimistic, last-check-wins; retrying is the
//! caller's decision). The storage collaborator applies each patch
//! atomically per record.

use serde::Deserialize;
use serde_json::json;

use intake_core::actor::Actor;
use intake_core::error::{CoreError, CoreResult};
use intake_core::history::{
    NewHistoryRecord, ProjectHistory, ACTION_ASSIGNED, ACTION_CLAIMED, ACTION_CREATED,
    ACTION_DELETED, ACTION_STATUS_CHANGED, ACTION_UPDATED,
};
use intake_core::permission;
use intake_core::project::{
    CreateProject, NewProjectRecord, Project, ProjectPatch, UpdateProject,
};
use intake_core::status::{self, ProjectStatus};
use intake_core::types::{RecordId, Timestamp};
use intake_core::validation;
use intake_store::query::{ProjectListParams, ProjectPage, MAX_PAGE_SIZE};
use intake_store::store::{HistoryStore, ProjectStore};

use crate::stats::ProjectStats;

// ---------------------------------------------------------------------------
// Request DTOs
// ---------------------------------------------------------------------------

/// Manager-driven assignment: choose an owner and start work in one step.
#[derive(Debug, Clone, Deserialize)]
pub struct AssignProject {
    pub owner_id: RecordId,
    pub owner_name: String,
    /// Optional start date; defaults to now. Ignored if work already
    /// started once.
    pub start_date: Option<Timestamp>,
    pub remarks: Option<String>,
}

/// A requested move along the status graph.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeStatus {
    pub status: ProjectStatus,
    /// Honored only when the move enters `in_progress` from review.
    pub start_date: Option<Timestamp>,
    pub remarks: Option<String>,
}

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Controller composing the authorization policy, the status flow, and the
/// storage collaborator.
pub struct ProjectService<S> {
    store: S,
}

impl<S> ProjectService<S>
where
    S: ProjectStore + HistoryStore,
{
    pub fn new(store: S) -> Self {
        ProjectService { store }
    }

    /// Access the underlying store, e.g. for test setup.
    pub fn store(&self) -> &S {
        &self.store
    }

    async fn fetch(&self, id: &RecordId) -> CoreResult<Project> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Project",
                id: id.clone(),
            })
    }

    async fn record(
        &self,
        project_id: &RecordId,
        actor: &Actor,
        action: &'static str,
        changes: serde_json::Value,
    ) -> CoreResult<()> {
        self.store
            .append(NewHistoryRecord {
                project_id: project_id.clone(),
                user_id: actor.id.clone(),
                user_name: actor.name.clone(),
                action,
                changes,
            })
            .await?;
        Ok(())
    }

    fn deny(&self, actor: &Actor, action: &str, message: &str) -> CoreError {
        tracing::warn!(actor_id = %actor.id, role = %actor.role, action, "Action denied");
        CoreError::Forbidden(message.to_string())
    }

    // -----------------------------------------------------------------------
    // CRUD
    // -----------------------------------------------------------------------

    /// Create a project. Any authenticated actor may submit; new projects
    /// always start `submitted`, owned by nobody, with the actor recorded
    /// as submitter.
    pub async fn create(&self, actor: &Actor, input: CreateProject) -> CoreResult<Project> {
        validation::validate_create(&input)?;

        let project = self
            .store
            .create(NewProjectRecord {
                name: input.name,
                project_type: input.project_type,
                description: input.description,
                priority: input.priority,
                status: ProjectStatus::Submitted,
                submitter_id: actor.id.clone(),
                submitter_name: actor.name.clone(),
                participant_ids: input.participant_ids,
                estimated_start_date: input.estimated_start_date,
                estimated_end_date: input.estimated_end_date,
                remarks: input.remarks,
                tags: input.tags,
            })
            .await?;

        self.record(
            &project.id,
            actor,
            ACTION_CREATED,
            json!({ "name": project.name, "project_type": project.project_type }),
        )
        .await?;

        tracing::info!(project_id = %project.id, actor_id = %actor.id, "Project created");
        Ok(project)
    }

    /// Fetch one project, subject to the view rule.
    pub async fn get(&self, actor: &Actor, id: &RecordId) -> CoreResult<Project> {
        let project = self.fetch(id).await?;
        if !permission::can_view(&project, actor) {
            return Err(self.deny(actor, "view", "You cannot view this project"));
        }
        Ok(project)
    }

    /// List projects. The store filters, sorts, and paginates; records the
    /// actor cannot view are dropped from the returned page (`total` keeps
    /// the unrestricted match count).
    pub async fn list(&self, actor: &Actor, params: &ProjectListParams) -> CoreResult<ProjectPage> {
        let mut page = self.store.list(params).await?;
        page.items.retain(|p| permission::can_view(p, actor));
        Ok(page)
    }

    /// Edit plain fields. Workflow fields (status, ownership, actual
    /// dates) are not reachable from here by construction.
    pub async fn update(
        &self,
        actor: &Actor,
        id: &RecordId,
        input: UpdateProject,
    ) -> CoreResult<Project> {
        let project = self.fetch(id).await?;
        if !permission::can_edit(&project, actor) {
            return Err(self.deny(actor, "edit", "You cannot edit this project"));
        }
        validation::validate_update(&input)?;

        if input.is_empty() {
            return Ok(project);
        }

        let fields = input.changed_fields();
        let updated = self
            .store
            .update(id, ProjectPatch::from(input))
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Project",
                id: id.clone(),
            })?;

        self.record(id, actor, ACTION_UPDATED, json!({ "fields": fields }))
            .await?;

        tracing::info!(project_id = %id, actor_id = %actor.id, "Project updated");
        Ok(updated)
    }

    /// Delete a project record. Admin only. The history trail is kept.
    pub async fn delete(&self, actor: &Actor, id: &RecordId) -> CoreResult<()> {
        let project = self.fetch(id).await?;
        if !permission::can_delete(&project, actor) {
            return Err(self.deny(actor, "delete", "Only admins can delete projects"));
        }

        self.store.delete(id).await?;
        self.record(id, actor, ACTION_DELETED, json!({ "name": project.name }))
            .await?;

        tracing::info!(project_id = %id, actor_id = %actor.id, "Project deleted");
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Workflow operations
    // -----------------------------------------------------------------------

    /// Claim a project: propose ownership and request review. The claim
    /// moves `submitted -> pending_review`; work does not start until a
    /// manager confirms, so no start date is stamped here.
    pub async fn claim(&self, actor: &Actor, id: &RecordId) -> CoreResult<Project> {
        let project = self.fetch(id).await?;
        if !permission::can_claim(&project, actor) {
            return Err(self.deny(actor, "claim", "You cannot claim this project"));
        }

        let change = status::plan_transition(&project, ProjectStatus::PendingReview, None)?;
        let mut patch = ProjectPatch::from(change);
        patch.owner_id = Some(actor.id.clone());
        patch.owner_name = Some(actor.name.clone());

        let updated = self.apply_patch(id, patch).await?;
        self.record(
            id,
            actor,
            ACTION_CLAIMED,
            json!({
                "owner_id": actor.id,
                "from": project.status,
                "to": updated.status,
            }),
        )
        .await?;

        tracing::info!(project_id = %id, actor_id = %actor.id, "Project claimed");
        Ok(updated)
    }

    /// Assign a project to a developer. Manager-driven and
    /// self-confirming: ownership and `in_progress` are set in one step,
    /// bypassing claim confirmation, whatever the current (non-completed)
    /// status. The start date is stamped here if work never started
    /// before.
    pub async fn assign(
        &self,
        actor: &Actor,
        id: &RecordId,
        input: AssignProject,
    ) -> CoreResult<Project> {
        let project = self.fetch(id).await?;
        if !permission::can_assign(&project, actor) {
            return Err(self.deny(actor, "assign", "You cannot assign this project"));
        }
        if let Some(ref remarks) = input.remarks {
            validation::validate_remarks(remarks)?;
        }

        let mut patch = ProjectPatch {
            status: Some(ProjectStatus::InProgress),
            owner_id: Some(input.owner_id.clone()),
            owner_name: Some(input.owner_name),
            remarks: input.remarks,
            ..ProjectPatch::default()
        };
        if project.actual_start_date.is_none() {
            patch.actual_start_date =
                Some(input.start_date.unwrap_or_else(chrono::Utc::now));
        }

        let updated = self.apply_patch(id, patch).await?;
        self.record(
            id,
            actor,
            ACTION_ASSIGNED,
            json!({
                "owner_id": input.owner_id,
                "from": project.status,
                "to": updated.status,
            }),
        )
        .await?;

        tracing::info!(
            project_id = %id,
            actor_id = %actor.id,
            owner_id = %updated.owner_id.as_deref().unwrap_or_default(),
            "Project assigned"
        );
        Ok(updated)
    }

    /// Move a project along the status graph. The transition must be legal
    /// from the just-fetched status and the actor must hold the authority
    /// that edge demands.
    pub async fn change_status(
        &self,
        actor: &Actor,
        id: &RecordId,
        input: ChangeStatus,
    ) -> CoreResult<Project> {
        let project = self.fetch(id).await?;

        // Legality first: an impossible edge is an IllegalTransition for
        // everyone, including admins.
        let change = status::plan_transition(&project, input.status, input.start_date)?;
        if !permission::can_change_status(&project, actor, input.status) {
            return Err(self.deny(
                actor,
                "change_status",
                "You cannot change this project's status",
            ));
        }
        if let Some(ref remarks) = input.remarks {
            validation::validate_remarks(remarks)?;
        }

        let mut patch = ProjectPatch::from(change);
        patch.remarks = input.remarks;

        let updated = self.apply_patch(id, patch).await?;
        self.record(
            id,
            actor,
            ACTION_STATUS_CHANGED,
            json!({ "from": project.status, "to": updated.status }),
        )
        .await?;

        tracing::info!(
            project_id = %id,
            actor_id = %actor.id,
            from = %project.status,
            to = %updated.status,
            "Project status changed"
        );
        Ok(updated)
    }

    /// Complete a project: the `in_progress -> completed` edge, gated on
    /// ownership or management authority.
    pub async fn complete(
        &self,
        actor: &Actor,
        id: &RecordId,
        remarks: Option<String>,
    ) -> CoreResult<Project> {
        let project = self.fetch(id).await?;
        if !permission::can_complete(&project, actor) {
            return Err(self.deny(actor, "complete", "You cannot complete this project"));
        }

        self.change_status(
            actor,
            id,
            ChangeStatus {
                status: ProjectStatus::Completed,
                start_date: None,
                remarks,
            },
        )
        .await
    }

    // -----------------------------------------------------------------------
    // History and dashboard
    // -----------------------------------------------------------------------

    /// The project's history trail, oldest first. View-gated.
    pub async fn history(&self, actor: &Actor, id: &RecordId) -> CoreResult<Vec<ProjectHistory>> {
        let project = self.fetch(id).await?;
        if !permission::can_view(&project, actor) {
            return Err(self.deny(actor, "view", "You cannot view this project"));
        }
        self.store.list_for_project(&project.id).await
    }

    /// Dashboard counters over the whole collection.
    pub async fn stats(&self) -> CoreResult<ProjectStats> {
        let page = self
            .store
            .list(&ProjectListParams {
                page_size: Some(MAX_PAGE_SIZE),
                ..ProjectListParams::default()
            })
            .await?;
        Ok(ProjectStats::compute(&page.items))
    }

    async fn apply_patch(&self, id: &RecordId, patch: ProjectPatch) -> CoreResult<Project> {
        self.store
            .update(id, patch)
            .await?
            .ok_or_else(|| CoreError::NotFound {
                entity: "Project",
                id: id.clone(),
            })
    }
}
