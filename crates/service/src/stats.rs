//! Dashboard counters computed over the project collection.
//!
//! The tabular backend offers no aggregate queries, so the counters are
//! computed client-side from a full listing.

use serde::Serialize;

use intake_core::project::{Project, ProjectType};
use intake_core::status::ProjectStatus;

/// Project counts by status and by type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total: usize,
    pub submitted: usize,
    pub pending_review: usize,
    pub in_progress: usize,
    pub completed: usize,
    pub data_projects: usize,
    pub system_projects: usize,
}

impl ProjectStats {
    /// Tally one pass over `projects`.
    pub fn compute(projects: &[Project]) -> Self {
        let mut stats = ProjectStats {
            total: projects.len(),
            ..ProjectStats::default()
        };
        for project in projects {
            match project.status {
                ProjectStatus::Submitted => stats.submitted += 1,
                ProjectStatus::PendingReview => stats.pending_review += 1,
                ProjectStatus::InProgress => stats.in_progress += 1,
                ProjectStatus::Completed => stats.completed += 1,
            }
            match project.project_type {
                ProjectType::DataDevelopment => stats.data_projects += 1,
                ProjectType::SystemDevelopment => stats.system_projects += 1,
            }
        }
        stats
    }
}
