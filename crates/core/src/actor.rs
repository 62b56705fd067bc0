//! The acting user, always passed explicitly into decision functions.

use serde::{Deserialize, Serialize};

use crate::roles::Role;
use crate::types::RecordId;

/// Identity and role of the user requesting an action.
///
/// Every permission check and every service operation takes an `Actor`
/// parameter; there is no ambient "current user" state anywhere in the
/// workspace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: RecordId,
    /// Display name, recorded on history entries and on claim.
    pub name: String,
    pub role: Role,
}

impl Actor {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, role: Role) -> Self {
        Actor {
            id: id.into(),
            name: name.into(),
            role,
        }
    }
}
