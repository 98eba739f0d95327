//! Resource clients for the catalog admin API.
//!
//! One client per resource, each owning its query cache and speaking to the
//! shared [`Transport`](crate::domain::ports::Transport). Mutations validate
//! locally, send, then invalidate the owning cache; reads go through the
//! stale-while-revalidate cache.

mod admin;
mod agents;
mod categories;
mod envelope;
mod products;
mod users;

pub use admin::AdminClient;
pub use agents::{AgentFilter, AgentsClient};
pub use categories::{CategoriesClient, CategoryFilter};
pub use products::{ProductFilter, ProductsClient};
pub use users::{UserFilter, UsersClient};
