//! Two-state activation status shared by every catalog resource.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Activation state of a catalog record.
///
/// The wire form is exactly `"Active"` or `"Deactive"`; the latter spelling
/// is the remote API's, preserved verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Visible and usable.
    Active,
    /// Hidden from consumers but retained.
    Deactive,
}

impl Status {
    /// Wire spelling of the status.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Deactive => "Deactive",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
