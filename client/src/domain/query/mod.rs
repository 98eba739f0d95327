//! Query-cache primitive shared by every resource client.

mod cache;
mod key;

pub use cache::{QueryCache, ReadMode, Snapshot};
pub use key::{FilterRecord, QueryKey};
