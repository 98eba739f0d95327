//! File-backed credential store.
//!
//! Persists the bearer token and account email as a small JSON document so
//! credentials survive process restarts, mirroring the behaviour of the
//! browser console this client replaces. Reads and writes are best-effort:
//! a missing or unreadable file behaves as an empty store, and a failed
//! write is logged rather than surfaced, because credential persistence is
//! never allowed to fail a request.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::ports::CredentialStore;

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredCredentials {
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

/// Credential store persisted as JSON at a fixed path.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    /// Store backed by the given file path.
    ///
    /// The file is created on first write; it does not need to exist yet.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> StoredCredentials {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(error) => {
                debug!(path = %self.path.display(), %error, "no stored credentials");
                return StoredCredentials::default();
            }
        };
        serde_json::from_slice(&bytes).unwrap_or_else(|error| {
            warn!(path = %self.path.display(), %error, "stored credentials unreadable");
            StoredCredentials::default()
        })
    }

    fn save(&self, credentials: &StoredCredentials) {
        let rendered = match serde_json::to_vec_pretty(credentials) {
            Ok(rendered) => rendered,
            Err(error) => {
                warn!(%error, "credentials failed to serialise");
                return;
            }
        };
        if let Err(error) = std::fs::write(&self.path, rendered) {
            warn!(path = %self.path.display(), %error, "credentials not persisted");
        }
    }
}

impl CredentialStore for FileCredentialStore {
    fn token(&self) -> Option<String> {
        self.load().token
    }

    fn set_token(&self, token: &str) {
        let mut credentials = self.load();
        credentials.token = Some(token.to_owned());
        self.save(&credentials);
    }

    fn email(&self) -> Option<String> {
        self.load().email
    }

    fn set_email(&self, email: &str) {
        let mut credentials = self.load();
        credentials.email = Some(email.to_owned());
        self.save(&credentials);
    }
}

#[cfg(test)]
mod tests {
    //! Covers persistence round trips and tolerance of damaged files.
    use rstest::rstest;

    use super::FileCredentialStore;
    use crate::domain::ports::CredentialStore;

    #[rstest]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let store = FileCredentialStore::new(dir.path().join("credentials.json"));
        assert_eq!(store.token(), None);
        assert_eq!(store.email(), None);
    }

    #[rstest]
    fn values_survive_a_new_store_instance() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::new(&path);
        store.set_token("tok-123");
        store.set_email("admin@example.com");

        let reloaded = FileCredentialStore::new(&path);
        assert_eq!(reloaded.token().as_deref(), Some("tok-123"));
        assert_eq!(reloaded.email().as_deref(), Some("admin@example.com"));
    }

    #[rstest]
    fn setting_one_key_preserves_the_other() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("credentials.json");

        let store = FileCredentialStore::new(&path);
        store.set_email("admin@example.com");
        store.set_token("tok-456");

        assert_eq!(store.email().as_deref(), Some("admin@example.com"));
    }

    #[rstest]
    fn corrupt_file_reads_as_empty() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("credentials.json");
        std::fs::write(&path, b"{ not json").expect("fixture written");

        let store = FileCredentialStore::new(&path);
        assert_eq!(store.token(), None);
    }
}
