//! Tests for the category client: validation gating, confirmation-gated
//! deletes, cache reuse, and mutation-driven invalidation.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde_json::json;

use super::{CategoriesClient, CategoryFilter};
use crate::domain::ports::{ApiResponse, MockTransport, RequestBody, TransportError, Verb};
use crate::domain::{CategoryDraft, Confirmation, DeleteOutcome, EntityId, Error, Status};

fn category_body(name: &str) -> serde_json::Value {
    json!({
        "data": [
            {"id": "cat-1", "category_name": name, "category_image": null, "status": "Active"}
        ]
    })
}

fn id() -> EntityId {
    EntityId::new("cat-1").expect("valid id")
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_transport() {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    let client = CategoriesClient::new(Arc::new(transport));

    let error = client
        .create(&CategoryDraft::named(""))
        .await
        .expect_err("blank name rejected");

    assert!(matches!(error, Error::Validation(_)));
}

#[tokio::test]
async fn dismissed_confirmation_sends_no_delete() {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    let client = CategoriesClient::new(Arc::new(transport));

    let outcome = client
        .delete(&id(), Confirmation::Dismissed)
        .await
        .expect("dismissal is not an error");

    assert_eq!(outcome, DeleteOutcome::Cancelled);
}

#[tokio::test]
async fn confirmed_delete_issues_the_request() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| request.verb == Verb::Delete && request.path == "/category/cat-1")
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, json!({"success": true}))));
    let client = CategoriesClient::new(Arc::new(transport));

    let outcome = client
        .delete(&id(), Confirmation::Confirmed)
        .await
        .expect("delete succeeds");

    assert_eq!(outcome, DeleteOutcome::Deleted);
}

#[tokio::test]
async fn repeated_list_without_mutation_hits_the_cache() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| request.verb == Verb::Get && request.path == "/category/all")
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, category_body("Shoes"))));
    let client = CategoriesClient::new(Arc::new(transport));
    let filter = CategoryFilter::with_status(Status::Active);

    let first = client.list(&filter).await;
    let second = client.list(&filter).await;

    assert_eq!(first.items().len(), 1);
    assert_eq!(second.items()[0].category_name, "Shoes");
}

#[tokio::test]
async fn status_filter_is_serialised_as_a_query_parameter() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            request
                .query
                .contains(&("status".to_owned(), "Deactive".to_owned()))
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, category_body("Hidden"))));
    let client = CategoriesClient::new(Arc::new(transport));

    let snapshot = client
        .list(&CategoryFilter::with_status(Status::Deactive))
        .await;

    assert_eq!(snapshot.items()[0].category_name, "Hidden");
}

#[tokio::test]
async fn successful_create_invalidates_the_listing() {
    let sequence = Arc::new(AtomicUsize::new(0));
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| request.verb == Verb::Get)
        .times(2)
        .returning(move |_| {
            let body = if sequence.fetch_add(1, Ordering::SeqCst) == 0 {
                category_body("Shoes")
            } else {
                category_body("Bags")
            };
            Ok(ApiResponse::new(200, body))
        });
    transport
        .expect_send()
        .withf(|request| request.verb == Verb::Post && request.path == "/category/create")
        .times(1)
        .returning(|_| Ok(ApiResponse::new(201, json!({"success": true}))));
    let client = CategoriesClient::new(Arc::new(transport));
    let filter = CategoryFilter::default();

    client.list(&filter).await;
    client
        .create(&CategoryDraft::named("Bags"))
        .await
        .expect("create succeeds");

    // The stale value is served while revalidation settles in the background.
    let stale = client.list(&filter).await;
    assert_eq!(stale.items()[0].category_name, "Shoes");
    tokio::task::yield_now().await;

    let refreshed = client.list(&filter).await;
    assert_eq!(
        refreshed.items()[0].category_name,
        "Bags",
        "read after a mutation must reflect the refetched listing"
    );
}

#[tokio::test]
async fn failed_create_surfaces_the_server_message_and_leaves_cache_alone() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| request.verb == Verb::Get)
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, category_body("Shoes"))));
    transport
        .expect_send()
        .withf(|request| request.verb == Verb::Post)
        .times(1)
        .returning(|_| Err(TransportError::status(500, "name already taken")));
    let client = CategoriesClient::new(Arc::new(transport));
    let filter = CategoryFilter::default();

    client.list(&filter).await;
    let error = client
        .create(&CategoryDraft::named("Shoes"))
        .await
        .expect_err("create fails");

    assert_eq!(error.status(), Some(500));
    assert_eq!(error.user_message(), "name already taken");
    // No invalidation happened: the follow-up list is a pure cache hit,
    // which the GET expectation (times(1)) enforces.
    let cached = client.list(&filter).await;
    assert_eq!(cached.items().len(), 1);
}

#[tokio::test]
async fn update_sends_multipart_with_the_draft_fields() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            let RequestBody::Multipart(form) = &request.body else {
                return false;
            };
            request.verb == Verb::Put
                && request.path == "/category/cat-1"
                && form.field_value("category_name") == Some("Renamed")
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, json!({"success": true}))));
    let client = CategoriesClient::new(Arc::new(transport));

    client
        .update(&id(), &CategoryDraft::named("Renamed"))
        .await
        .expect("update succeeds");
}

#[tokio::test]
async fn set_status_patches_the_restricted_field() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            let RequestBody::Json(body) = &request.body else {
                return false;
            };
            request.verb == Verb::Patch && body["status"] == "Deactive"
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, json!({"success": true}))));
    let client = CategoriesClient::new(Arc::new(transport));

    client
        .set_status(&id(), Status::Deactive)
        .await
        .expect("status change succeeds");
}
