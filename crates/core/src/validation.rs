//! Field validation for project create and edit payloads.
//!
//! The workflow engine trusts these checks to run before anything is
//! persisted; none of them consult status or role (that is the policy's
//! job), they only vet the shape of caller-supplied fields.

use crate::error::CoreError;
use crate::project::{CreateProject, UpdateProject};
use crate::types::Timestamp;

/// Maximum length for a project name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum length for a project description.
pub const MAX_DESCRIPTION_LENGTH: usize = 10_000;

/// Maximum length for the remarks field.
pub const MAX_REMARKS_LENGTH: usize = 2_000;

/// Validate a project name: non-blank, bounded length.
pub fn validate_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Project name must not be empty".to_string(),
        ));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(CoreError::Validation(format!(
            "Project name exceeds maximum length of {MAX_NAME_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate the description length.
pub fn validate_description(description: &str) -> Result<(), CoreError> {
    if description.len() > MAX_DESCRIPTION_LENGTH {
        return Err(CoreError::Validation(format!(
            "Description exceeds maximum length of {MAX_DESCRIPTION_LENGTH} characters (got {})",
            description.len()
        )));
    }
    Ok(())
}

/// Validate the remarks length.
pub fn validate_remarks(remarks: &str) -> Result<(), CoreError> {
    if remarks.len() > MAX_REMARKS_LENGTH {
        return Err(CoreError::Validation(format!(
            "Remarks exceed maximum length of {MAX_REMARKS_LENGTH} characters"
        )));
    }
    Ok(())
}

/// Validate that an estimated window is ordered. Both dates are advisory
/// and individually optional.
pub fn validate_estimated_window(
    start: Option<Timestamp>,
    end: Option<Timestamp>,
) -> Result<(), CoreError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(CoreError::Validation(
                "Estimated end date must not precede the estimated start date".to_string(),
            ));
        }
    }
    Ok(())
}

/// Validate a full creation payload.
pub fn validate_create(input: &CreateProject) -> Result<(), CoreError> {
    validate_name(&input.name)?;
    validate_description(&input.description)?;
    if let Some(ref remarks) = input.remarks {
        validate_remarks(remarks)?;
    }
    validate_estimated_window(input.estimated_start_date, input.estimated_end_date)
}

/// Validate an edit payload. Only fields present in the patch are checked.
pub fn validate_update(input: &UpdateProject) -> Result<(), CoreError> {
    if let Some(ref name) = input.name {
        validate_name(name)?;
    }
    if let Some(ref description) = input.description {
        validate_description(description)?;
    }
    if let Some(ref remarks) = input.remarks {
        validate_remarks(remarks)?;
    }
    validate_estimated_window(input.estimated_start_date, input.estimated_end_date)
}
