//! Top-level client configuration and facade.

use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use thiserror::Error;
use tracing::debug;

use crate::api::{AdminClient, AgentsClient, CategoriesClient, ProductsClient, UsersClient};
use crate::domain::ports::CredentialStore;
use crate::outbound::HttpTransport;

/// Environment variable naming the API base URL.
pub const BASE_URL_VAR: &str = "CATALOG_API_BASE_URL";
/// Environment variable overriding the request timeout, in seconds.
pub const TIMEOUT_VAR: &str = "CATALOG_API_TIMEOUT_SECONDS";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Failures constructing a [`CatalogClient`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The base URL environment variable is absent.
    #[error("{BASE_URL_VAR} is not set")]
    MissingBaseUrl,
    /// The base URL did not parse.
    #[error("invalid base URL {value:?}: {message}")]
    InvalidBaseUrl {
        /// The rejected value.
        value: String,
        /// Parser diagnostic.
        message: String,
    },
    /// The timeout override did not parse as whole seconds.
    #[error("invalid {TIMEOUT_VAR} value {value:?}")]
    InvalidTimeout {
        /// The rejected value.
        value: String,
    },
    /// The underlying HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Http(#[from] reqwest::Error),
}

/// Where and how the client talks to the catalog API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL every request path resolves against.
    pub base_url: Url,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl ClientConfig {
    /// Configuration with the default timeout.
    #[must_use]
    pub fn new(base_url: Url) -> Self {
        Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Override the per-request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Read configuration from the environment.
    ///
    /// `CATALOG_API_BASE_URL` is required; `CATALOG_API_TIMEOUT_SECONDS`
    /// optionally overrides the default timeout.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] when the base URL is absent or malformed,
    /// or when the timeout override does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(
            std::env::var(BASE_URL_VAR).ok(),
            std::env::var(TIMEOUT_VAR).ok(),
        )
    }

    fn from_vars(base: Option<String>, timeout: Option<String>) -> Result<Self, ConfigError> {
        let raw = base.ok_or(ConfigError::MissingBaseUrl)?;
        let base_url = Url::parse(&raw).map_err(|error| ConfigError::InvalidBaseUrl {
            value: raw,
            message: error.to_string(),
        })?;
        let mut config = Self::new(base_url);
        if let Some(raw) = timeout {
            let seconds: u64 = raw
                .parse()
                .map_err(|_| ConfigError::InvalidTimeout { value: raw })?;
            config.timeout = Duration::from_secs(seconds);
        }
        Ok(config)
    }
}

/// Facade bundling one transport with a client per resource.
///
/// All resource clients share a single [`HttpTransport`], so they agree on
/// the base URL, timeout, and credential store. Each keeps its own query
/// cache; a mutation through one client never touches another's cache.
pub struct CatalogClient {
    admin: AdminClient<HttpTransport>,
    categories: CategoriesClient<HttpTransport>,
    agents: AgentsClient<HttpTransport>,
    products: ProductsClient<HttpTransport>,
    users: UsersClient<HttpTransport>,
}

impl CatalogClient {
    /// Build the facade from a configuration and a credential store.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Http`] when the HTTP client cannot be built.
    pub fn new(
        config: &ClientConfig,
        credentials: Arc<dyn CredentialStore>,
    ) -> Result<Self, ConfigError> {
        debug!(base_url = %config.base_url, timeout = ?config.timeout, "building catalog client");
        let transport = Arc::new(HttpTransport::new(
            config.base_url.clone(),
            config.timeout,
            Arc::clone(&credentials),
        )?);
        Ok(Self {
            admin: AdminClient::new(Arc::clone(&transport), credentials),
            categories: CategoriesClient::new(Arc::clone(&transport)),
            agents: AgentsClient::new(Arc::clone(&transport)),
            products: ProductsClient::new(Arc::clone(&transport)),
            users: UsersClient::new(transport),
        })
    }

    /// Administrator account operations.
    #[must_use]
    pub fn admin(&self) -> &AdminClient<HttpTransport> {
        &self.admin
    }

    /// Category operations.
    #[must_use]
    pub fn categories(&self) -> &CategoriesClient<HttpTransport> {
        &self.categories
    }

    /// Agent operations.
    #[must_use]
    pub fn agents(&self) -> &AgentsClient<HttpTransport> {
        &self.agents
    }

    /// Product operations, including bulk import.
    #[must_use]
    pub fn products(&self) -> &ProductsClient<HttpTransport> {
        &self.products
    }

    /// End-user moderation operations.
    #[must_use]
    pub fn users(&self) -> &UsersClient<HttpTransport> {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    //! Covers configuration parsing and facade construction.
    use std::sync::Arc;
    use std::time::Duration;

    use reqwest::Url;
    use rstest::rstest;

    use super::{CatalogClient, ClientConfig, ConfigError};
    use crate::domain::ports::MemoryCredentialStore;

    fn base() -> Url {
        Url::parse("https://api.example.com/api/v1").expect("valid url")
    }

    #[rstest]
    fn config_defaults_the_timeout() {
        let config = ClientConfig::new(base());
        assert_eq!(config.timeout, Duration::from_secs(30));
    }

    #[rstest]
    fn timeout_override_is_applied() {
        let config = ClientConfig::new(base()).with_timeout(Duration::from_secs(5));
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn absent_base_url_variable_is_reported() {
        let error = ClientConfig::from_vars(None, None).expect_err("rejected");
        assert!(matches!(error, ConfigError::MissingBaseUrl));
    }

    #[rstest]
    fn malformed_base_url_is_reported_with_the_offending_value() {
        let error = ClientConfig::from_vars(Some("not a url".to_owned()), None)
            .expect_err("rejected");
        assert!(
            matches!(error, ConfigError::InvalidBaseUrl { ref value, .. } if value == "not a url")
        );
    }

    #[rstest]
    #[case("soon")]
    #[case("1.5")]
    #[case("-1")]
    fn non_numeric_timeout_is_reported(#[case] raw: &str) {
        let error = ClientConfig::from_vars(
            Some("https://api.example.com/api".to_owned()),
            Some(raw.to_owned()),
        )
        .expect_err("rejected");
        assert!(matches!(error, ConfigError::InvalidTimeout { ref value } if value == raw));
    }

    #[rstest]
    fn timeout_variable_overrides_the_default() {
        let config = ClientConfig::from_vars(
            Some("https://api.example.com/api".to_owned()),
            Some("5".to_owned()),
        )
        .expect("parsed");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[rstest]
    fn facade_builds_from_a_valid_config() {
        let config = ClientConfig::new(base());
        let client = CatalogClient::new(&config, Arc::new(MemoryCredentialStore::new()));
        assert!(client.is_ok());
    }
}
