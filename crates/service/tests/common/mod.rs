#![allow(dead_code)]

use intake_core::actor::Actor;
use intake_core::project::{CreateProject, Priority, Project, ProjectType};
use intake_core::roles::Role;
use intake_service::ProjectService;
use intake_store::MemoryStore;

/// Build a service over a fresh in-memory store.
pub fn build_service() -> ProjectService<MemoryStore> {
    ProjectService::new(MemoryStore::new())
}

pub fn admin() -> Actor {
    Actor::new("admin-1", "Ada Admin", Role::Admin)
}

pub fn manager() -> Actor {
    Actor::new("pm-1", "Paula Manager", Role::ProjectManager)
}

pub fn developer() -> Actor {
    Actor::new("dev-1", "Devon Developer", Role::Developer)
}

pub fn plain_user() -> Actor {
    Actor::new("user-1", "Uma User", Role::User)
}

/// A second user with no relationship to anything submitted by the others.
pub fn stranger() -> Actor {
    Actor::new("user-99", "Sid Stranger", Role::User)
}

pub fn create_request(name: &str, project_type: ProjectType) -> CreateProject {
    CreateProject {
        name: name.to_string(),
        project_type,
        description: format!("{name} description"),
        priority: Priority::Medium,
        participant_ids: Vec::new(),
        estimated_start_date: None,
        estimated_end_date: None,
        remarks: None,
        tags: Vec::new(),
    }
}

/// Submit a project as `actor` and return the created record.
pub async fn submit_project(
    service: &ProjectService<MemoryStore>,
    actor: &Actor,
    name: &str,
    project_type: ProjectType,
) -> Project {
    service
        .create(actor, create_request(name, project_type))
        .await
        .expect("project creation should succeed")
}
