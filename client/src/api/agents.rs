//! Affiliate agent resource client.

use std::sync::Arc;

use pagination::Page;
use serde_json::json;
use tracing::debug;

use super::envelope::decode_page;
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{FilterRecord, QueryCache, ReadMode, Snapshot};
use crate::domain::{
    Agent, AgentDraft, ClientResult, Confirmation, DeleteOutcome, EntityId, Status,
};

const RESOURCE: &str = "agents";

/// List filters recognised by the agent endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AgentFilter {
    /// Restrict the listing to one activation state.
    pub status: Option<Status>,
}

impl AgentFilter {
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

/// Client for `/agent/...` operations.
///
/// Mirrors the category client: cached listings, validated multipart
/// mutations, and confirmation-gated deletes.
pub struct AgentsClient<T> {
    transport: Arc<T>,
    cache: Arc<QueryCache<Page<Agent>>>,
}

impl<T: Transport + 'static> AgentsClient<T> {
    /// Client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            cache: Arc::new(QueryCache::new(RESOURCE)),
        }
    }

    /// List agents, served from cache when the slot is fresh.
    pub async fn list(&self, filter: &AgentFilter) -> Snapshot<Page<Agent>> {
        self.read(filter, ReadMode::CachedOrFetch).await
    }

    /// Force a fresh fetch for the given filter's slot.
    pub async fn refetch(&self, filter: &AgentFilter) -> Snapshot<Page<Agent>> {
        self.read(filter, ReadMode::Force).await
    }

    async fn read(&self, filter: &AgentFilter, mode: ReadMode) -> Snapshot<Page<Agent>> {
        let record = filter.record();
        let key = self.cache.key(&record);
        let transport = Arc::clone(&self.transport);
        let query = record.to_query_pairs();
        self.cache
            .read(key, mode, move || async move {
                let response = transport
                    .send(ApiRequest::get("/agent/all").with_query(query))
                    .await?;
                decode_page(response)
            })
            .await
    }

    /// Create an agent.
    ///
    /// # Errors
    ///
    /// Returns a validation error before any request when the draft is
    /// invalid, or the server's rejection otherwise.
    pub async fn create(&self, draft: &AgentDraft) -> ClientResult<()> {
        draft.validate()?;
        self.transport
            .send(ApiRequest::post("/agent/create").with_multipart(draft.to_form()))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Replace an agent's fields, including its conversion rates.
    ///
    /// # Errors
    ///
    /// As for [`AgentsClient::create`].
    pub async fn update(&self, id: &EntityId, draft: &AgentDraft) -> ClientResult<()> {
        draft.validate()?;
        self.transport
            .send(ApiRequest::put(format!("/agent/{id}")).with_multipart(draft.to_form()))
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
            .send(ApiRequest::patch(format!("/agent/{id}")).with_json(json!({"status": status})))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }

    /// Delete an agent, gated on explicit confirmation.
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
            .send(ApiRequest::delete(format!("/agent/{id}")))
            .await?;
        self.cache.invalidate_all();
        Ok(DeleteOutcome::Deleted)
    }
}
