//! Actor roles consumed by the authorization policy.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Role of an actor. Read-only input to permission decisions; the tracker
/// never stores or mutates roles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Admin,
    ProjectManager,
    Developer,
    User,
}

/// All valid roles.
pub const ALL_ROLES: &[Role] = &[
    Role::Admin,
    Role::ProjectManager,
    Role::Developer,
    Role::User,
];

impl Role {
    /// The stored string form.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::ProjectManager => "project_manager",
            Role::Developer => "developer",
            Role::User => "user",
        }
    }

    /// Parse a stored role string, failing closed on unknown values.
    pub fn parse(value: &str) -> Result<Self, CoreError> {
        match value {
            "admin" => Ok(Role::Admin),
            "project_manager" => Ok(Role::ProjectManager),
            "developer" => Ok(Role::Developer),
            "user" => Ok(Role::User),
            other => Err(CoreError::InvalidState(format!("Unknown role '{other}'"))),
        }
    }

    /// Admins and project managers carry project-management authority:
    /// reviewing, assigning, and moving any project through the workflow.
    pub fn is_manager(self) -> bool {
        matches!(self, Role::Admin | Role::ProjectManager)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
