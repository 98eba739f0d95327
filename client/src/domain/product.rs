//! Product entity, affiliate links, and the product draft form.

use serde::{Deserialize, Serialize};
use serde_json::json;
use url::Url;

use super::attachment::ImageAttachment;
use super::error::{ValidationError, require_non_blank, require_non_negative};
use super::id::EntityId;
use super::ports::MultipartForm;
use super::status::Status;

/// An outbound affiliate link: which agent it belongs to and where it points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffiliateLink {
    /// Agent the link is attributed to.
    pub agent_id: EntityId,
    /// Destination URL.
    pub link: String,
}

/// A catalog product as returned by the remote API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Server-assigned identifier.
    pub id: EntityId,
    /// Display name.
    pub product_name: String,
    /// Long description.
    #[serde(default)]
    pub description: String,
    /// List price.
    pub price: f64,
    /// Discounted price, when one is set.
    #[serde(default)]
    pub offer_price: Option<f64>,
    /// Available sizes.
    #[serde(default)]
    pub sizes: Vec<String>,
    /// Available colours.
    #[serde(default)]
    pub colors: Vec<String>,
    /// Image URLs in display order.
    #[serde(default)]
    pub images: Vec<String>,
    /// Owning category, when assigned.
    #[serde(default, rename = "categoryId")]
    pub category_id: Option<EntityId>,
    /// Affiliate links attributed to agents.
    #[serde(default)]
    pub affiliates: Vec<AffiliateLink>,
    /// Activation state.
    pub status: Status,
}

/// Fields submitted when creating or updating a product.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductDraft {
    /// Required display name.
    pub product_name: String,
    /// Long description.
    pub description: String,
    /// Required list price.
    pub price: f64,
    /// Discounted price.
    pub offer_price: Option<f64>,
    /// Owning category.
    pub category_id: Option<EntityId>,
    /// Available sizes.
    pub sizes: Vec<String>,
    /// Available colours.
    pub colors: Vec<String>,
    /// Affiliate links attributed to agents.
    pub affiliates: Vec<AffiliateLink>,
    /// New images to upload.
    pub images: Vec<ImageAttachment>,
    /// URLs of already-uploaded images to keep, in display order.
    pub existing_images: Vec<String>,
}

impl ProductDraft {
    /// Draft with the given name and price.
    #[must_use]
    pub fn new(product_name: impl Into<String>, price: f64) -> Self {
        Self {
            product_name: product_name.into(),
            price,
            ..Self::default()
        }
    }

    /// Check required fields, price sanity, and affiliate link shape.
    ///
    /// # Errors
    ///
    /// Returns the first failing check: blank name, negative or non-finite
    /// price, or an affiliate destination that does not parse as a URL.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_non_blank("product_name", &self.product_name)?;
        require_non_negative("price", self.price)?;
        if let Some(offer) = self.offer_price {
            require_non_negative("offer_price", offer)?;
        }
        for affiliate in &self.affiliates {
            if Url::parse(&affiliate.link).is_err() {
                return Err(ValidationError::InvalidUrl { field: "affiliates" });
            }
        }
        Ok(())
    }

    /// Render the draft as the JSON body used on create.
    #[must_use]
    pub fn to_create_json(&self) -> serde_json::Value {
        let mut body = json!({
            "product_name": self.product_name,
            "description": self.description,
            "price": self.price,
            "sizes": self.sizes,
            "colors": self.colors,
            "affiliates": self.affiliates,
        });
        if let Some(offer) = self.offer_price {
            body["offer_price"] = json!(offer);
        }
        if let Some(category) = &self.category_id {
            body["categoryId"] = json!(category);
        }
        body
    }

    /// Render the draft as the multipart form used on update.
    ///
    /// Collection fields travel as JSON-encoded strings inside the form,
    /// matching the remote endpoint's contract; new images are file parts
    /// under the repeated `images` field.
    #[must_use]
    pub fn to_update_form(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .field("product_name", self.product_name.clone())
            .field("description", self.description.clone())
            .field("price", self.price.to_string())
            .opt_field("offer_price", self.offer_price.map(|p| p.to_string()))
            .opt_field(
                "categoryId",
                self.category_id.as_ref().map(|id| id.as_str().to_owned()),
            )
            .field("sizes", encode_json_field(&self.sizes))
            .field("colors", encode_json_field(&self.colors))
            .field("affiliates", encode_json_field(&self.affiliates));
        if !self.existing_images.is_empty() {
            form = form.field("existing_images", encode_json_field(&self.existing_images));
        }
        for image in &self.images {
            form = form.file(image.to_part("images"));
        }
        form
    }
}

fn encode_json_field<T: Serialize>(value: &T) -> String {
    // Vec and AffiliateLink serialisation cannot fail.
    serde_json::to_string(value).unwrap_or_else(|_| "[]".to_owned())
}
