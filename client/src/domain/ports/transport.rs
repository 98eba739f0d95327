//! Transport port between resource clients and the HTTP adapter.
//!
//! Resource clients describe a request ([`ApiRequest`]) and hand it to the
//! [`Transport`] port; the adapter owns serialisation, credential injection,
//! and status mapping. Keeping the port this narrow lets tests substitute a
//! mock and assert that, for example, a rejected draft never reaches `send`.

use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use super::UploadProgress;

/// HTTP verbs used against the catalog API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verb {
    /// Read a resource.
    Get,
    /// Create a resource or invoke an action.
    Post,
    /// Replace a resource.
    Put,
    /// Partially update a resource.
    Patch,
    /// Remove a resource.
    Delete,
}

impl Verb {
    /// Canonical upper-case method name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a file part's content comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSource {
    /// In-memory content.
    Bytes(Vec<u8>),
    /// Content read from the local filesystem at send time.
    Path(PathBuf),
}

/// One file part of a multipart body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Multipart field name.
    pub name: String,
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type reported to the server.
    pub content_type: String,
    /// Content source.
    pub source: FileSource,
}

/// Multipart form body: ordered text fields plus file parts.
#[derive(Clone, Default)]
pub struct MultipartForm {
    /// Text fields in submission order.
    pub fields: Vec<(String, String)>,
    /// File parts in submission order.
    pub files: Vec<FilePart>,
    /// Observer for upload progress, when the caller wants it.
    pub progress: Option<Arc<dyn UploadProgress>>,
}

impl MultipartForm {
    /// Empty form.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field.
    #[must_use]
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Append a text field only when a value is present.
    #[must_use]
    pub fn opt_field(self, name: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.field(name, value),
            None => self,
        }
    }

    /// Append a file part.
    #[must_use]
    pub fn file(mut self, part: FilePart) -> Self {
        self.files.push(part);
        self
    }

    /// Attach an upload progress observer.
    #[must_use]
    pub fn with_progress(mut self, progress: Arc<dyn UploadProgress>) -> Self {
        self.progress = Some(progress);
        self
    }

    /// Look up a text field by name.
    #[must_use]
    pub fn field_value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for MultipartForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipartForm")
            .field("fields", &self.fields)
            .field("files", &self.files)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

/// Request body variants the transport understands.
#[derive(Debug, Clone, Default)]
pub enum RequestBody {
    /// No body.
    #[default]
    Empty,
    /// JSON document.
    Json(serde_json::Value),
    /// Multipart form, used for uploads carrying binary attachments.
    Multipart(MultipartForm),
}

/// A fully described request, ready for the adapter to send.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP verb.
    pub verb: Verb,
    /// Path relative to the configured base URL.
    pub path: String,
    /// Query parameters in submission order.
    pub query: Vec<(String, String)>,
    /// Request body.
    pub body: RequestBody,
}

impl ApiRequest {
    /// Describe a request with the given verb and path.
    #[must_use]
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            verb,
            path: path.into(),
            query: Vec::new(),
            body: RequestBody::Empty,
        }
    }

    /// Shorthand for a GET request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    /// Shorthand for a POST request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    /// Shorthand for a PUT request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::Put, path)
    }

    /// Shorthand for a PATCH request.
    #[must_use]
    pub fn patch(path: impl Into<String>) -> Self {
        Self::new(Verb::Patch, path)
    }

    /// Shorthand for a DELETE request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    /// Attach query parameters.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(String, String)>) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = RequestBody::Json(body);
        self
    }

    /// Attach a multipart body.
    #[must_use]
    pub fn with_multipart(mut self, form: MultipartForm) -> Self {
        self.body = RequestBody::Multipart(form);
        self
    }
}

/// A decoded success response.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    /// HTTP status code (always 2xx; rejections surface as errors).
    pub status: u16,
    /// Decoded JSON body; `Null` when the response body was empty.
    pub body: serde_json::Value,
}

impl ApiResponse {
    /// Build a response from a status and decoded body.
    #[must_use]
    pub fn new(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }
}

/// Errors surfaced by transport adapters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection-level failure before a response arrived.
    #[error("transport failed: {message}")]
    Transport {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The request exceeded the adapter's configured timeout.
    #[error("request timed out: {message}")]
    Timeout {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The response body could not be decoded as JSON.
    #[error("response decoding failed: {message}")]
    Decode {
        /// Adapter-supplied failure description.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("status {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Message derived from the error payload, or a generic fallback.
        message: String,
    },
}

impl TransportError {
    /// Helper for connection-level failures.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Helper for timeouts.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Helper for body decoding failures.
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Helper for non-success statuses.
    pub fn status(status: u16, message: impl Into<String>) -> Self {
        Self::Status {
            status,
            message: message.into(),
        }
    }
}

/// Port through which every request leaves the client.
///
/// The adapter resolves the path against its base URL, injects the bearer
/// token supplied by its credential store, and maps non-2xx responses into
/// [`TransportError::Status`]. It applies no retry policy and takes no
/// decisions on status codes beyond success/failure.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one request and decode its JSON response.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError>;
}
