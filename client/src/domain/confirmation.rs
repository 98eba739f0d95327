//! Explicit confirmation for destructive actions.

/// Outcome of asking the operator to confirm a destructive action.
///
/// A dismissed confirmation is an ordinary no-op, not an error: the delete
/// call short-circuits before any request is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    /// The operator confirmed the action.
    Confirmed,
    /// The operator dismissed the prompt.
    Dismissed,
}

impl Confirmation {
    /// Whether the prompt was dismissed.
    #[must_use]
    pub fn is_dismissed(self) -> bool {
        matches!(self, Self::Dismissed)
    }
}

/// Result of a confirmation-gated delete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// The record was deleted on the server.
    Deleted,
    /// The operator dismissed the confirmation; nothing was sent.
    Cancelled,
}
