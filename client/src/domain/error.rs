//! Client error taxonomy.
//!
//! Three families, matching how failures are handled: validation failures are
//! raised before any request leaves the process; API failures carry the
//! status and human-readable message of a non-2xx response; transport
//! failures cover everything that prevented a response from arriving at all.
//! Nothing in this crate retries an error automatically.

use thiserror::Error;

use crate::domain::ports::TransportError;

/// Fallback shown when a failed response carries no usable message.
pub const GENERIC_FAILURE_MESSAGE: &str = "request failed, please try again";

/// Top-level error returned by resource clients.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Input failed local validation; no request was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// The server answered with a non-success status.
    #[error("server rejected the request ({status}): {message}")]
    Api {
        /// HTTP status code of the rejection.
        status: u16,
        /// Human-readable message derived from the error payload.
        message: String,
    },
    /// The request never produced a usable response.
    #[error("transport failure: {message}")]
    Transport {
        /// Underlying transport failure description.
        message: String,
    },
}

impl Error {
    /// Human-readable message suitable for surfacing to an operator.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(inner) => inner.to_string(),
            Self::Api { message, .. } | Self::Transport { message } => message.clone(),
        }
    }

    /// Status code of the server rejection, when one exists.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<TransportError> for Error {
    fn from(error: TransportError) -> Self {
        match error {
            TransportError::Status { status, message } => Self::Api { status, message },
            other => Self::Transport {
                message: other.to_string(),
            },
        }
    }
}

/// Field-level failures raised before a request is built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field was empty or blank.
    #[error("{field} is required")]
    Required {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A numeric field was negative or not finite.
    #[error("{field} must be a finite, non-negative number")]
    InvalidNumber {
        /// Name of the offending field.
        field: &'static str,
    },
    /// A field expected to hold a URL did not parse as one.
    #[error("{field} must be a well-formed URL")]
    InvalidUrl {
        /// Name of the offending field.
        field: &'static str,
    },
    /// An email address was missing its user or domain part.
    #[error("email must contain a user and a domain part")]
    InvalidEmail,
    /// An identifier was empty or padded with whitespace.
    #[error("identifier must be a non-empty, trimmed string")]
    InvalidId,
    /// The file is not one of the accepted spreadsheet types.
    #[error("{file_name} is not an accepted spreadsheet (.xlsx, .xls, or .csv)")]
    UnsupportedSpreadsheet {
        /// Name of the rejected file.
        file_name: String,
    },
    /// The file meets or exceeds the upload size ceiling.
    #[error("{file_name} is too large: {size} bytes meets the {limit} byte ceiling")]
    SpreadsheetTooLarge {
        /// Name of the rejected file.
        file_name: String,
        /// Observed file size in bytes.
        size: u64,
        /// Configured ceiling in bytes.
        limit: u64,
    },
}

/// Require a non-blank string field.
///
/// # Errors
///
/// Returns [`ValidationError::Required`] when `value` is empty or whitespace.
pub fn require_non_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(())
}

/// Require a finite, non-negative numeric field.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidNumber`] when `value` is negative, NaN,
/// or infinite.
pub fn require_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ValidationError::InvalidNumber { field });
    }
    Ok(())
}

/// Require a plausible email address.
///
/// The check is shallow on purpose: a non-empty user part, one `@`, and a
/// domain part containing a dot. The server remains the authority.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidEmail`] when the shape check fails.
pub fn require_email(value: &str) -> Result<(), ValidationError> {
    let Some((user, domain)) = value.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };
    if user.trim().is_empty() || domain.trim().is_empty() || !domain.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(())
}
