//! End-user records, read and moderated by the console but never created.

use serde::{Deserialize, Serialize};

use super::id::EntityId;
use super::status::Status;

/// Minimal view of the agent a user is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentSummary {
    /// Display name of the agent.
    pub agent_name: String,
    /// Image URL, when one exists.
    #[serde(default)]
    pub agent_image: Option<String>,
}

/// A registered end user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    pub name: String,
    /// Account email.
    pub email: String,
    /// Phone number, when provided.
    #[serde(default)]
    pub phone: Option<String>,
    /// Preferred currency code, when provided.
    #[serde(default)]
    pub currency: Option<String>,
    /// Attributed agent, when one exists.
    #[serde(default)]
    pub agent: Option<AgentSummary>,
    /// Activation state.
    pub status: Status,
}
