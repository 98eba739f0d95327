//! Credential storage port.
//!
//! The transport adapter queries this port for the bearer token on every
//! send, so credential rotation is picked up without rebuilding the client.
//! The stored email supports the password-reset flow, which remembers which
//! account requested a reset code. Absence of either value is an ordinary
//! state, not an error: requests simply go out unauthenticated.

use std::sync::RwLock;

/// Port for reading and persisting the bearer token and account email.
#[cfg_attr(test, mockall::automock)]
pub trait CredentialStore: Send + Sync {
    /// Current bearer token, if one has been stored.
    fn token(&self) -> Option<String>;

    /// Persist a bearer token.
    fn set_token(&self, token: &str);

    /// Current account email, if one has been stored.
    fn email(&self) -> Option<String>;

    /// Persist the account email.
    fn set_email(&self, email: &str);
}

#[derive(Debug, Default)]
struct Credentials {
    token: Option<String>,
    email: Option<String>,
}

/// In-memory credential store for programmatic use and tests.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Credentials>,
}

impl MemoryCredentialStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-seeded with a bearer token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let store = Self::new();
        store.set_token(&token.into());
        store
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Credentials> {
        self.inner.read().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Credentials> {
        self.inner.write().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn token(&self) -> Option<String> {
        self.read().token.clone()
    }

    fn set_token(&self, token: &str) {
        self.write().token = Some(token.to_owned());
    }

    fn email(&self) -> Option<String> {
        self.read().email.clone()
    }

    fn set_email(&self, email: &str) {
        self.write().email = Some(email.to_owned());
    }
}
