use crate::status::ProjectStatus;
use crate::types::RecordId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: RecordId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Illegal status transition: {from} -> {to}")]
    IllegalTransition {
        from: ProjectStatus,
        to: ProjectStatus,
    },

    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// A record arrived from the storage collaborator with data outside the
    /// domain's closed enumerations. Treated as an upstream defect; callers
    /// must fail closed rather than guess.
    #[error("Invalid state: {0}")]
    InvalidState(String),
}

/// Convenience alias used across all crates in the workspace.
pub type CoreResult<T> = Result<T, CoreError>;
