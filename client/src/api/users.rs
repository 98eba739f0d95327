//! End-user resource client.
//!
//! Users register through the storefront, never through this console; the
//! console only lists them and toggles their activation state. There is no
//! create, update, or delete here on purpose.

use std::sync::Arc;

use pagination::{Page, PageRequest};
use serde_json::json;

use super::envelope::decode_page;
use crate::domain::ports::{ApiRequest, Transport};
use crate::domain::query::{FilterRecord, QueryCache, ReadMode, Snapshot};
use crate::domain::{ClientResult, EntityId, Status, User};

const RESOURCE: &str = "users";

/// List filters recognised by the user endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UserFilter {
    /// Which page to request.
    pub page: PageRequest,
}

impl UserFilter {
    /// Filter for the given page.
    #[must_use]
    pub fn for_page(page: PageRequest) -> Self {
        Self { page }
    }

    fn record(&self) -> FilterRecord {
        let mut record = FilterRecord::new();
        record.extend(self.page.to_query_pairs());
        record
    }
}

/// Client for `/user/...` operations.
pub struct UsersClient<T> {
    transport: Arc<T>,
    cache: Arc<QueryCache<Page<User>>>,
}

impl<T: Transport + 'static> UsersClient<T> {
    /// Client over the given transport.
    #[must_use]
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            transport,
            cache: Arc::new(QueryCache::new(RESOURCE)),
        }
    }

    /// List users, served from cache when the slot is fresh.
    pub async fn list(&self, filter: &UserFilter) -> Snapshot<Page<User>> {
        self.read(filter, ReadMode::CachedOrFetch).await
    }

    /// Force a fresh fetch for the given filter's slot.
    pub async fn refetch(&self, filter: &UserFilter) -> Snapshot<Page<User>> {
        self.read(filter, ReadMode::Force).await
    }

    async fn read(&self, filter: &UserFilter, mode: ReadMode) -> Snapshot<Page<User>> {
        let record = filter.record();
        let key = self.cache.key(&record);
        let transport = Arc::clone(&self.transport);
        let query = record.to_query_pairs();
        self.cache
            .read(key, mode, move || async move {
                let response = transport
                    .send(ApiRequest::get("/user/all").with_query(query))
                    .await?;
                decode_page(response)
            })
            .await
    }

    /// Change a user's activation state.
    ///
    /// # Errors
    ///
    /// Returns the server's rejection when the update fails.
    pub async fn set_status(&self, id: &EntityId, status: Status) -> ClientResult<()> {
        self.transport
            .send(ApiRequest::patch(format!("/user/{id}")).with_json(json!({"status": status})))
            .await?;
        self.cache.invalidate_all();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    //! Exercises the moderation surface; shared cache behaviour is covered
    //! by the category client's tests.
    use std::sync::Arc;

    use pagination::PageRequest;
    use serde_json::json;

    use super::{UserFilter, UsersClient};
    use crate::domain::ports::{ApiResponse, MockTransport, RequestBody, Verb};
    use crate::domain::{EntityId, Status};

    #[tokio::test]
    async fn listing_pages_through_the_user_endpoint() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                request.path == "/user/all"
                    && request
                        .query
                        .contains(&("page".to_owned(), "3".to_owned()))
            })
            .times(1)
            .returning(|_| {
                Ok(ApiResponse::new(
                    200,
                    json!({
                        "data": [{
                            "id": "u-9",
                            "name": "Ada",
                            "email": "ada@example.com",
                            "status": "Active"
                        }],
                        "pagination": {"totalUser": 21, "page": 3, "limit": 10, "totalPages": 3}
                    }),
                ))
            });
        let client = UsersClient::new(Arc::new(transport));

        let snapshot = client
            .list(&UserFilter::for_page(PageRequest::new(3, 10)))
            .await;

        assert_eq!(snapshot.items()[0].name, "Ada");
        assert_eq!(snapshot.page_info().total, 21);
    }

    #[tokio::test]
    async fn set_status_patches_the_user_record() {
        let mut transport = MockTransport::new();
        transport
            .expect_send()
            .withf(|request| {
                let RequestBody::Json(body) = &request.body else {
                    return false;
                };
                request.verb == Verb::Patch
                    && request.path == "/user/u-9"
                    && body["status"] == "Deactive"
            })
            .times(1)
            .returning(|_| Ok(ApiResponse::new(200, json!({"success": true}))));
        let client = UsersClient::new(Arc::new(transport));

        let id = EntityId::new("u-9").expect("valid id");
        client
            .set_status(&id, Status::Deactive)
            .await
            .expect("status change succeeds");
    }
}
