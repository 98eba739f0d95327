//! Ports at the client's outbound boundary.
//!
//! Resource clients depend on these traits rather than on reqwest or the
//! filesystem directly, so tests can substitute mocks and assert on exactly
//! which requests were (or were not) issued.

mod credential_store;
mod transport;
mod upload_progress;

#[cfg(test)]
pub use credential_store::MockCredentialStore;
pub use credential_store::{CredentialStore, MemoryCredentialStore};
#[cfg(test)]
pub use transport::MockTransport;
pub use transport::{
    ApiRequest, ApiResponse, FilePart, FileSource, MultipartForm, RequestBody, Transport,
    TransportError, Verb,
};
pub use upload_progress::{NoOpUploadProgress, UploadProgress, WatchUploadProgress};
