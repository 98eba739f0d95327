//! Category entity and its draft form.

use serde::{Deserialize, Serialize};

use super::attachment::ImageAttachment;
use super::error::{ValidationError, require_non_blank};
use super::id::EntityId;
use super::ports::MultipartForm;
use super::status::Status;

/// A catalog category as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    pub category_name: String,
    /// Image URL, when one has been uploaded.
    #[serde(default)]
    pub category_image: Option<String>,
    /// Activation state.
    pub status: Status,
}

/// Fields submitted when creating or updating a category.
///
/// Validation runs before any request is built; an invalid draft never
/// reaches the transport.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryDraft {
    /// Required display name.
    pub category_name: String,
    /// Optional image to upload.
    pub category_image: Option<ImageAttachment>,
}

impl CategoryDraft {
    /// Draft with the given name and no image.
    #[must_use]
    pub fn named(category_name: impl Into<String>) -> Self {
        Self {
            category_name: category_name.into(),
            category_image: None,
        }
    }

    /// Attach an image.
    #[must_use]
    pub fn with_image(mut self, image: ImageAttachment) -> Self {
        self.category_image = Some(image);
        self
    }

    /// Check required fields.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] when the name is blank.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("category_name", &self.category_name)
    }

    /// Render the draft as the multipart form the API expects.
    #[must_use]
    pub fn to_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new().field("category_name", self.category_name.clone());
        if let Some(image) = &self.category_image {
            form = form.file(image.to_part("category_image"));
        }
        form
    }
}
