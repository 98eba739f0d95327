//! The signed-in administrator's profile.

use serde::{Deserialize, Serialize};

use super::id::EntityId;

/// Profile of the currently authenticated administrator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminProfile {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
}
