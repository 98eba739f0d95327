//! Product resource client, including the bulk spreadsheet import.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use serde_json::json;
use tracing::{debug, info};

use super::envelope::decode_page;
use crate::domain::ports::{ApiRequest, MultipartForm, Transport, UploadProgress};
use crate::domain::query::{FilterRecord, QueryCache, ReadMode, Snapshot};
use crate::domain::{
    ClientResult, Confirmation, DeleteOutcome, EntityId, Product, ProductDraft, SpreadsheetFile,
    Status,
};

const RESOURCE: &str = "products";

/// List filters recognised by the product endpoint.
///
/// Unlike categories and agents, the product listing is paginated and
/// searchable by name. Each distinct combination addresses its own cache
/// slot, so paging back to an already-visited page is served without a
/// refetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    /// Which page to request.
    pub page: PageRequest,
    /// Restrict the listing to one activation state.
    pub status: Option<Status>,
    /// Case-insensitive name search, applied server-side.
    pub product_name: Option<String>,
}

impl ProductFilter {
    /// Filter for the given page with no other constraints.
    #[must_use]
    pub fn for_page(page: PageRequest) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Restrict to one activation state.
    #[must_use]
    pub fn with_status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Search by product name.
    #[must_use]
    pub fn with_name(mut self, product_name: impl Into<String>) -> Self {
        self.product_name = Some(product_name.into());
        self
    }

    fn record(&self) -> FilterRecord {
        let mut record = FilterRecord::new();
        record.extend(self.page.to_query_pairs());
        record.push_opt("status", self.status);
        record.push_opt("product_name", self.product_name.as_deref());
        record
    }
}

/// Client for `/product/...` operations.
pub struct ProductsClient<T> {
    transport: Arc<T>,
    cache: Arc<QueryCache<Page<Product>>>,
}

impl<T: Transport + 'static> ProductsClient<T> {
    /// Client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            cache: Arc::new(QueryCache::new(RESOURCE)),
        }
    }

    /// List products, served from cache when the slot is fresh.
    pub async fn list(&self, filter: &ProductFilter) -> Snapshot<Page<Product>> {
        self.read(filter, ReadMode::CachedOrFetch).await
    }

    /// Force a fresh fetch for the given filter's slot.
    pub async fn refetch(&self, filter: &ProductFilter) -> Snapshot<Page<Product>> {
        self.read(filter, ReadMode::Force).await
    }

    async fn read(&self, filter: &ProductFilter, mode: ReadMode) -> Snapshot<Page<Product>> {
        let record = filter.record();
        let key = self.cache.key(&record);
        let transport = Arc::clone(&self.transport);
        let query = record.to_query_pairs();
        self.cache
            .read(key, mode, move || async move {
                let response = transport
                    .send(ApiRequest::get("/product/all").with_query(query))
                    .await?;
                decode_page(response)
            })
            .await
    }

    /// Create a product from a JSON draft.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request when the draft is
    /// invalid, or the server's rejection otherwise.
    pub async fn create(&self, draft: &ProductDraft) -> ClientResult<()> {
        draft.validate()?;
        self.transport
            .send(ApiRequest::post("/product/create").with_json(draft.to_create_json()))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Replace a product's fields, uploading any new images.
    ///
    /// # Errors
    ///
    /// As for [`ProductsClient::create`].
    pub async fn update(&self, id: &EntityId, draft: &ProductDraft) -> ClientResult<()> {
        draft.validate()?;
        self.transport
            .send(
                ApiRequest::put(format!("/product/update/{id}"))
                    .with_multipart(draft.to_update_form()),
            )
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Change only the activation state.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection when the update fails.
    pub async fn set_status(&self, id: &EntityId, status: Status) -> ClientResult<()> {
        self.transport
            .send(ApiRequest::patch(format!("/product/{id}")).with_json(json!({"status": status})))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Delete a product, gated on explicit confirmation.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection when the delete fails.
    pub async fn delete(
        &self,
        id: &EntityId,
        confirmation: Confirmation,
    ) -> ClientResult<DeleteOutcome> {
        if confirmation.is_dismissed() {
            debug!(resource = RESOURCE, id = %id, "delete dismissed");
            return Ok(DeleteOutcome::Cancelled);
        }
        self.transport
            .send(ApiRequest::delete(format!("/product/{id}")))
            .await?;
        self.cache.invalidate_all();
        Ok(DeleteOutcome::Deleted)
    }

    /// Bulk-import products from a spreadsheet.
    ///
    /// The file's type and size are checked locally; a file that fails
    /// either check never reaches the transport. Progress is reported
    /// through `progress` as the body streams out.
    ///
    /// # Errors
    ///
    /// Returns a validation error for unsupported or oversized files, or the
    /// server's rejection of the upload otherwise.
    pub async fn bulk_import(
        &self,
        file: &SpreadsheetFile,
        progress: Arc<dyn UploadProgress>,
    ) -> ClientResult<()> {
        file.validate()?;
        let form = MultipartForm::new()
            .file(file.to_part())
            .with_progress(progress);
        self.transport
            .send(ApiRequest::post("/product/upload-xlsx").with_multipart(form))
            .await?;
        info!(resource = RESOURCE, file = %file.file_name, "bulk import accepted");
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
#[path = "products_tests.rs"]
mod tests;
