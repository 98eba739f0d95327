//! Opaque entity identifiers assigned by the remote system.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::ValidationError;

/// Server-assigned identifier for a catalog record.
///
/// Identifiers are opaque, non-empty, trimmed strings; the client never
/// generates one.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntityId(String);

impl EntityId {
    /// Validate and construct an identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] when the input is empty or
    /// padded with whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let raw = value.into();
        if raw.is_empty() || raw.trim() != raw {
            return Err(ValidationError::InvalidId);
        }
        Ok(Self(raw))
    }

    /// Borrow the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<String> for EntityId {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> Self {
        id.0
    }
}

impl AsRef<str> for EntityId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    //! Validates identifier construction rules.
    use rstest::rstest;

    use super::EntityId;

    #[rstest]
    #[case("")]
    #[case(" padded")]
    #[case("padded ")]
    fn malformed_identifiers_are_rejected(#[case] raw: &str) {
        assert!(EntityId::new(raw).is_err());
    }

    #[rstest]
    fn opaque_strings_round_trip_through_serde() {
        let id = EntityId::new("cat-00042").expect("valid id");
        let encoded = serde_json::to_string(&id).expect("id encodes");
        assert_eq!(encoded, "\"cat-00042\"");
        let decoded: EntityId = serde_json::from_str(&encoded).expect("id decodes");
        assert_eq!(decoded, id);
    }
}
