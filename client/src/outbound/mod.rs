//! Adapters for the client's outbound ports.

pub mod credentials;
pub mod rest;

pub use credentials::FileCredentialStore;
pub use rest::HttpTransport;
