//! Category resource client.

use std::sync::Arc;

use pagination::Page;
use serde_json::json;
use tracing::debug;

use super::envelope::decode_page;
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{FilterRecord, QueryCache, ReadMode, Snapshot};
use crate::domain::{
    Category, CategoryDraft, ClientResult, Confirmation, DeleteOutcome, EntityId, Status,
};

const RESOURCE: &str = "categories";

/// List filters recognised by the category endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryFilter {
    /// Restrict the listing to one activation state.
    pub status: Option<Status>,
}

impl CategoryFilter {
    /// Filter on one activation state.
    #[must_use]
    pub fn with_status(status: Status) -> Self {
        Self {
            status: Some(status),
        }
    }

    fn record(&self) -> FilterRecord {
        let mut record = FilterRecord::new();
        record.push_opt("status", self.status);
        record
    }
}

/// Client for `/category/...` operations.
///
/// Listings go through a per-resource query cache; every successful mutation
/// invalidates that cache so the next read of the active key reflects the
/// write. The cache never holds speculative state: only confirmed server
/// responses are stored.
pub struct CategoriesClient<T> {
    transport: Arc<T>,
    cache: Arc<QueryCache<Page<Category>>>,
}

impl<T: Transport + 'static> CategoriesClient<T> {
    /// Client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            cache: Arc::new(QueryCache::new(RESOURCE)),
        }
    }

    /// List categories, served from cache when the slot is fresh.
    pub async fn list(&self, filter: &CategoryFilter) -> Snapshot<Page<Category>> {
        self.read(filter, ReadMode::CachedOrFetch).await
    }

    /// Force a fresh fetch for the given filter's slot.
    pub async fn refetch(&self, filter: &CategoryFilter) -> Snapshot<Page<Category>> {
        self.read(filter, ReadMode::Force).await
    }

    async fn read(&self, filter: &CategoryFilter, mode: ReadMode) -> Snapshot<Page<Category>> {
        let record = filter.record();
        let key = self.cache.key(&record);
        let transport = Arc::clone(&self.transport);
        let query = record.to_query_pairs();
        self.cache
            .read(key, mode, move || async move {
                let response = transport
                    .send(ApiRequest::get("/category/all").with_query(query))
                    .await?;
                decode_page(response)
            })
            .await
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request when the draft is
    /// invalid, or the server's rejection otherwise.
    pub async fn create(&self, draft: &CategoryDraft) -> ClientResult<()> {
        draft.validate()?;
        self.transport
            .send(ApiRequest::post("/category/create").with_multipart(draft.to_form()))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Replace a category's fields.
    ///
    /// # Errors
    ///
    /// As for [`CategoriesClient::create`].
    pub async fn update(&self, id: &EntityId, draft: &CategoryDraft) -> ClientResult<()> {
        draft.validate()?;
        self.transport
            .send(ApiRequest::put(format!("/category/{id}")).with_multipart(draft.to_form()))
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
            .send(ApiRequest::patch(format!("/category/{id}")).with_json(json!({"status": status})))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Delete a category, gated on explicit confirmation.
    ///
    /// A dismissed confirmation sends nothing and leaves the cache as it
    /// was.
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
            .send(ApiRequest::delete(format!("/category/{id}")))
            .await?;
        self.cache.invalidate_all();
        Ok(DeleteOutcome::Deleted)
    }
}

#[cfg(test)]
#[path = "categories_tests.rs"]
mod tests;
