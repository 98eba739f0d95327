//! Reqwest-backed REST transport adapter.

mod transport;

pub use transport::HttpTransport;
