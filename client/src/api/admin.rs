//! Administrator profile and password-reset client.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info};

use super::envelope::decode_item;
use crate::domain::AdminProfile;
use crate::domain::ClientResult;
use crate::domain::error::{require_email, require_non_blank};
use crate::domain::ports::{ApiRequest, CredentialStore, Transport};
use crate::domain::query::{FilterRecord, QueryCache, ReadMode, Snapshot};

const RESOURCE: &str = "admin";

/// Client for the signed-in administrator's own account.
///
/// The profile read goes through the query cache like any listing; the
/// password-reset flow writes into the injected credential store so the
/// requesting email and, later, the fresh bearer token survive for the
/// transport to pick up.
pub struct AdminClient<T> {
    transport: Arc<T>,
    credentials: Arc<dyn CredentialStore>,
    cache: Arc<QueryCache<AdminProfile>>,
}

impl<T: Transport + 'static> AdminClient<T> {
    /// Client over the given transport and credential store.
    #[must_use]
    pub fn new(transport: Arc<T>, credentials: Arc<dyn CredentialStore>) -> Self {
        Self {
            transport,
            credentials,
            cache: Arc::new(QueryCache::new(RESOURCE)),
        }
    }

    /// The signed-in administrator's profile, served from cache when fresh.
    pub async fn me(&self) -> Snapshot<AdminProfile> {
        self.read(ReadMode::CachedOrFetch).await
    }

    /// Force a fresh profile fetch.
    pub async fn refresh_me(&self) -> Snapshot<AdminProfile> {
        self.read(ReadMode::Force).await
    }

    async fn read(&self, mode: ReadMode) -> Snapshot<AdminProfile> {
        let key = self.cache.key(&FilterRecord::new());
        let transport = Arc::clone(&self.transport);
        self.cache
            .read(key, mode, move || async move {
                let response = transport.send(ApiRequest::get("/admin/me")).await?;
                decode_item(response)
            })
            .await
    }

    /// Request a one-time reset code for the given account email.
    ///
    /// On success the email is remembered in the credential store, so the
    /// follow-up [`AdminClient::set_new_password`] call can quote the same
    /// account.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email, or the server's
    /// rejection otherwise.
    pub async fn send_reset_code(&self, email: &str) -> ClientResult<()> {
        require_email(email)?;
        self.transport
            .send(
                ApiRequest::post("/admin-forgot-password/send-reset-code")
                    .with_json(json!({"email": email})),
            )
            .await?;
        self.credentials.set_email(email);
        debug!(resource = RESOURCE, "reset code requested");
        Ok(())
    }

    /// Redeem a reset code for a new password.
    ///
    /// A token returned in the response body is stored immediately, so the
    /// session continues without a separate sign-in.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a malformed email or blank code or
    /// password, or the server's rejection otherwise.
    pub async fn set_new_password(
        &self,
        email: &str,
        otp: &str,
        password: &str,
    ) -> ClientResult<()> {
        require_email(email)?;
        require_non_blank("otp", otp)?;
        require_non_blank("password", password)?;
        let response = self
            .transport
            .send(
                ApiRequest::post("/admin-forgot-password/set-new-password").with_json(json!({
                    "email": email,
                    "otp": otp,
                    "password": password,
                })),
            )
            .await?;
        if let Some(token) = response.body.get("token").and_then(|t| t.as_str()) {
            self.credentials.set_token(token);
            info!(resource = RESOURCE, "password reset, session token stored");
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "admin_tests.rs"]
mod tests;
