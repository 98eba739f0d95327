//! Domain types and the query-cache service.
//!
//! Purpose: define the entities exchanged with the catalog API, the draft
//! forms and their pre-network validation, the ports resource clients depend
//! on, and the stale-while-revalidate query cache. Adapters live under
//! `crate::outbound`; resource clients under `crate::api`.

pub mod admin;
pub mod agent;
pub mod attachment;
pub mod category;
pub mod confirmation;
pub mod error;
pub mod id;
pub mod ports;
pub mod product;
pub mod query;
pub mod spreadsheet;
pub mod status;
pub mod user;

pub use self::admin::AdminProfile;
pub use self::agent::{Agent, AgentDraft};
pub use self::attachment::ImageAttachment;
pub use self::category::{Category, CategoryDraft};
pub use self::confirmation::{Confirmation, DeleteOutcome};
pub use self::error::{Error, GENERIC_FAILURE_MESSAGE, ValidationError};
pub use self::id::EntityId;
pub use self::product::{AffiliateLink, Product, ProductDraft};
pub use self::query::{FilterRecord, QueryCache, QueryKey, ReadMode, Snapshot};
pub use self::spreadsheet::{SIZE_LIMIT_BYTES, SpreadsheetFile};
pub use self::status::Status;
pub use self::user::{AgentSummary, User};

/// Convenient result alias for client operations.
pub type ClientResult<T> = Result<T, Error>;
