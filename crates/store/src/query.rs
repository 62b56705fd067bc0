//! List query parameters and the paginated response shape.
//!
//! Filtering, sorting, and pagination are storage concerns: they live with
//! the collaborator so the workflow engine never has to reason about them.

use serde::{Deserialize, Serialize};

use intake_core::project::{Priority, Project, ProjectType};
use intake_core::status::ProjectStatus;

/// Default number of projects per page.
pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Maximum number of projects per page.
pub const MAX_PAGE_SIZE: usize = 1_000;

/// Sortable project fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    CreatedAt,
    UpdatedAt,
    Name,
    Priority,
    Status,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// Filter, sort, and pagination parameters for project listings.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProjectListParams {
    pub project_type: Option<ProjectType>,
    pub status: Option<ProjectStatus>,
    pub priority: Option<Priority>,
    /// Case-insensitive keyword over name and description.
    pub keyword: Option<String>,
    /// Defaults to newest-first creation order.
    pub sort_by: Option<SortField>,
    pub sort_order: Option<SortOrder>,
    /// 1-based page number.
    pub page: Option<usize>,
    pub page_size: Option<usize>,
}

impl ProjectListParams {
    /// Effective 1-based page.
    pub fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    /// Effective page size, clamped to `1..=MAX_PAGE_SIZE`.
    pub fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }

    /// Whether `project` passes the filter portion of the parameters.
    pub fn matches(&self, project: &Project) -> bool {
        if let Some(t) = self.project_type {
            if project.project_type != t {
                return false;
            }
        }
        if let Some(s) = self.status {
            if project.status != s {
                return false;
            }
        }
        if let Some(p) = self.priority {
            if project.priority != p {
                return false;
            }
        }
        if let Some(ref keyword) = self.keyword {
            let needle = keyword.to_lowercase();
            if !needle.is_empty()
                && !project.name.to_lowercase().contains(&needle)
                && !project.description.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// One page of project listings.
#[derive(Debug, Clone, Serialize)]
pub struct ProjectPage {
    pub items: Vec<Project>,
    /// Total records matching the filter, across all pages.
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
}
