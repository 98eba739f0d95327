//! Client SDK for the catalog admin API.
//!
//! The crate is organised hexagonally: `domain` holds the entities, their
//! validation, the outbound ports, and the stale-while-revalidate query
//! cache; `outbound` holds the reqwest transport and file-backed credential
//! store adapters; `api` holds one client per resource; [`CatalogClient`]
//! bundles them over one shared transport.
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use catalog_client::{CatalogClient, ClientConfig};
//! use catalog_client::domain::ports::MemoryCredentialStore;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ClientConfig::from_env()?;
//! let credentials = Arc::new(MemoryCredentialStore::with_token("bearer-token"));
//! let client = CatalogClient::new(&config, credentials)?;
//!
//! let categories = client
//!     .categories()
//!     .list(&Default::default())
//!     .await;
//! println!("{} categories", categories.items().len());
//! # Ok(())
//! # }
//! ```

pub mod api;
mod client;
pub mod domain;
pub mod outbound;
#[cfg(test)]
mod test_support;

pub use client::{BASE_URL_VAR, CatalogClient, ClientConfig, ConfigError, TIMEOUT_VAR};
pub use domain::{ClientResult, Error};
