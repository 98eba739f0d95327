//! Spreadsheet files accepted by the bulk-import endpoint.
//!
//! Both checks — accepted type and size ceiling — run locally, before any
//! request is built. A file that fails either check never reaches the
//! transport.

use std::path::Path;

use super::error::ValidationError;
use super::ports::{FilePart, FileSource};

/// Upload size ceiling: files at or above 1 GiB are rejected locally.
pub const SIZE_LIMIT_BYTES: u64 = 1024 * 1024 * 1024;

/// Multipart field name the bulk-import endpoint reads the file from.
pub const UPLOAD_FIELD: &str = "excelFile";

const ACCEPTED_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];
const ACCEPTED_MIME_TYPES: [&str; 3] = [
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.ms-excel",
    "text/csv",
];

/// A candidate file for bulk import, validated before submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpreadsheetFile {
    /// File name as presented by the caller.
    pub file_name: String,
    /// MIME type reported to the server.
    pub content_type: String,
    /// Size in bytes, known up front so the ceiling check is local.
    pub size: u64,
    /// Content source.
    pub source: FileSource,
}

impl SpreadsheetFile {
    /// Candidate backed by in-memory bytes.
    ///
    /// The MIME type is inferred from the file extension; unrecognised
    /// extensions fall back to `application/octet-stream` and are rejected
    /// by [`SpreadsheetFile::validate`].
    #[must_use]
    pub fn from_bytes(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        Self {
            content_type: infer_content_type(&file_name).to_owned(),
            size: bytes.len() as u64,
            source: FileSource::Bytes(bytes),
            file_name,
        }
    }

    /// Candidate read from the filesystem, sized via metadata.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedSpreadsheet`] when the file
    /// cannot be inspected at all.
    pub async fn from_path(path: &Path) -> Result<Self, ValidationError> {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let metadata = tokio::fs::metadata(path).await.map_err(|_| {
            ValidationError::UnsupportedSpreadsheet {
                file_name: file_name.clone(),
            }
        })?;
        Ok(Self {
            content_type: infer_content_type(&file_name).to_owned(),
            size: metadata.len(),
            source: FileSource::Path(path.to_path_buf()),
            file_name,
        })
    }

    /// Check type and size locally.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::UnsupportedSpreadsheet`] for anything that
    /// is not an .xlsx/.xls/.csv file (by extension or accepted MIME type),
    /// and [`ValidationError::SpreadsheetTooLarge`] for files at or above
    /// [`SIZE_LIMIT_BYTES`] regardless of extension.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let extension_accepted = extension_of(&self.file_name)
            .is_some_and(|ext| ACCEPTED_EXTENSIONS.contains(&ext.as_str()));
        let mime_accepted = ACCEPTED_MIME_TYPES.contains(&self.content_type.as_str());
        if !extension_accepted && !mime_accepted {
            return Err(ValidationError::UnsupportedSpreadsheet {
                file_name: self.file_name.clone(),
            });
        }
        if self.size >= SIZE_LIMIT_BYTES {
            return Err(ValidationError::SpreadsheetTooLarge {
                file_name: self.file_name.clone(),
                size: self.size,
                limit: SIZE_LIMIT_BYTES,
            });
        }
        Ok(())
    }

    /// Render the file as the multipart part the endpoint expects.
    #[must_use]
    pub fn to_part(&self) -> FilePart {
        FilePart {
            name: UPLOAD_FIELD.to_owned(),
            file_name: self.file_name.clone(),
            content_type: self.content_type.clone(),
            source: self.source.clone(),
        }
    }
}

fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
}

fn infer_content_type(file_name: &str) -> &'static str {
    match extension_of(file_name).as_deref() {
        Some("xlsx") => "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
        Some("xls") => "application/vnd.ms-excel",
        Some("csv") => "text/csv",
        _ => "application/octet-stream",
    }
}
