//! Cache keys derived from resource names and filter records.

use std::fmt;

/// Ordered, canonicalised filter parameters for a list query.
///
/// Field order follows insertion order, so every call site that builds its
/// record in declaration order produces the same key for the same inputs.
/// Absent optional filters are skipped rather than serialised as empties,
/// keeping `status=None` and `status=""` from aliasing different slots.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterRecord {
    pairs: Vec<(String, String)>,
}

impl FilterRecord {
    /// Empty record.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one filter field.
    pub fn push(&mut self, name: impl Into<String>, value: impl fmt::Display) {
        self.pairs.push((name.into(), value.to_string()));
    }

    /// Append one filter field when a value is present.
    pub fn push_opt(&mut self, name: impl Into<String>, value: Option<impl fmt::Display>) {
        if let Some(value) = value {
            self.push(name, value);
        }
    }

    /// Append already-rendered pairs, preserving their order.
    pub fn extend(&mut self, pairs: Vec<(String, String)>) {
        self.pairs.extend(pairs);
    }

    /// Render the record as query-string pairs.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        self.pairs.clone()
    }

    fn canonical(&self) -> String {
        self.pairs
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("&")
    }
}

/// Addressable slot identity: resource tag plus canonicalised filters.
///
/// The key is a pure function of its inputs; the same resource and filter
/// record always address the same cache slot.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryKey(String);

impl QueryKey {
    /// Derive the key for a resource and filter record.
    #[must_use]
    pub fn for_resource(resource: &str, filters: &FilterRecord) -> Self {
        let canonical = filters.canonical();
        if canonical.is_empty() {
            Self(resource.to_owned())
        } else {
            Self(format!("{resource}?{canonical}"))
        }
    }

    /// Borrow the canonical form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for QueryKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    //! Validates key purity and optional-filter handling.
    use rstest::rstest;

    use super::{FilterRecord, QueryKey};

    fn record(status: Option<&str>, page: u32) -> FilterRecord {
        let mut filters = FilterRecord::new();
        filters.push("page", page);
        filters.push_opt("status", status);
        filters
    }

    #[rstest]
    fn identical_inputs_address_the_same_slot() {
        let first = QueryKey::for_resource("products", &record(Some("Active"), 1));
        let second = QueryKey::for_resource("products", &record(Some("Active"), 1));
        assert_eq!(first, second);
    }

    #[rstest]
    fn changing_any_filter_changes_the_key() {
        let base = QueryKey::for_resource("products", &record(Some("Active"), 1));
        assert_ne!(
            base,
            QueryKey::for_resource("products", &record(Some("Deactive"), 1))
        );
        assert_ne!(
            base,
            QueryKey::for_resource("products", &record(Some("Active"), 2))
        );
        assert_ne!(
            base,
            QueryKey::for_resource("categories", &record(Some("Active"), 1))
        );
    }

    #[rstest]
    fn absent_optionals_are_skipped() {
        let key = QueryKey::for_resource("products", &record(None, 1));
        assert_eq!(key.as_str(), "products?page=1");
    }

    #[rstest]
    fn empty_record_keys_on_resource_alone() {
        let key = QueryKey::for_resource("admin", &FilterRecord::new());
        assert_eq!(key.as_str(), "admin");
    }
}
