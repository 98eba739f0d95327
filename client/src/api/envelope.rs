//! Decoding of the API's list and item envelopes.
//!
//! List endpoints wrap their payload as `{"data": [...], "pagination": ...}`
//! and disagree on the name of the total-count field (`totalProduct`,
//! `totalUser`, plain `total`). Everything is normalised here into
//! [`Page`] with an all-fields-present [`PageInfo`], zero-valued when the
//! server sent no metadata.

use pagination::{Page, PageInfo};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::domain::Error;
use crate::domain::ports::ApiResponse;

#[derive(Debug, Deserialize)]
struct ListEnvelope<T> {
    #[serde(default = "Vec::new")]
    data: Vec<T>,
    #[serde(default)]
    pagination: Option<PageInfoDto>,
}

#[derive(Debug, Default, Deserialize)]
struct PageInfoDto {
    #[serde(
        default,
        alias = "totalProduct",
        alias = "totalUser",
        alias = "totalItems"
    )]
    total: u64,
    #[serde(default)]
    page: u32,
    #[serde(default)]
    limit: u32,
    #[serde(default, alias = "totalPages")]
    total_pages: u32,
}

impl From<PageInfoDto> for PageInfo {
    fn from(dto: PageInfoDto) -> Self {
        Self {
            total: dto.total,
            page: dto.page,
            limit: dto.limit,
            total_pages: dto.total_pages,
        }
    }
}

/// Decode a list response into a normalised page.
///
/// # Errors
///
/// Returns [`Error::Transport`] when the payload does not match the list
/// envelope shape.
pub fn decode_page<T: DeserializeOwned>(response: ApiResponse) -> Result<Page<T>, Error> {
    let envelope: ListEnvelope<T> =
        serde_json::from_value(response.body).map_err(|error| Error::Transport {
            message: format!("unexpected list payload: {error}"),
        })?;
    Ok(Page::new(
        envelope.data,
        envelope.pagination.map(PageInfo::from).unwrap_or_default(),
    ))
}

/// Decode a single-item response body.
///
/// # Errors
///
/// Returns [`Error::Transport`] when the payload does not match `T`.
pub fn decode_item<T: DeserializeOwned>(response: ApiResponse) -> Result<T, Error> {
    serde_json::from_value(response.body).map_err(|error| Error::Transport {
        message: format!("unexpected payload: {error}"),
    })
}
