//! Image attachments carried by create and update forms.

use std::path::PathBuf;

use crate::domain::ports::{FilePart, FileSource};

/// An image to upload alongside a create or update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageAttachment {
    /// File name reported to the server.
    pub file_name: String,
    /// MIME type reported to the server.
    pub content_type: String,
    /// Content source.
    pub source: FileSource,
}

impl ImageAttachment {
    /// Attachment backed by in-memory bytes.
    #[must_use]
    pub fn from_bytes(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            source: FileSource::Bytes(bytes),
        }
    }

    /// Attachment read from the filesystem at send time.
    #[must_use]
    pub fn from_path(file_name: impl Into<String>, content_type: impl Into<String>, path: PathBuf) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            source: FileSource::Path(path),
        }
    }

    /// Render the attachment as a multipart file part under `field`.
    #[must_use]
    pub fn to_part(&self, field: &str) -> FilePart {
        FilePart {
            name: field.to_owned(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            source: self.source.clone(),
        }
    }
}
