//! Tests for the product client: paginated cache keys, the JSON/multipart
//! body split, and the bulk-import gates.

use std::sync::Arc;

use pagination::PageRequest;
use serde_json::json;

use super::{ProductFilter, ProductsClient};
use crate::domain::ports::{
    ApiResponse, MockTransport, NoOpUploadProgress, RequestBody, UploadProgress, Verb,
};
use crate::domain::{
    Error, ProductDraft, SIZE_LIMIT_BYTES, SpreadsheetFile, Status, ValidationError,
};

fn product_body(name: &str) -> serde_json::Value {
    json!({
        "data": [{
            "id": "p-1",
            "product_name": name,
            "price": 59.5,
            "status": "Active"
        }],
        "pagination": {"totalProduct": 1, "page": 1, "limit": 10, "totalPages": 1}
    })
}

#[tokio::test]
async fn each_page_addresses_its_own_cache_slot() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            request
                .query
                .contains(&("page".to_owned(), "1".to_owned()))
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, product_body("Boots"))));
    transport
        .expect_send()
        .withf(|request| {
            request
                .query
                .contains(&("page".to_owned(), "2".to_owned()))
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, product_body("Sandals"))));
    let client = ProductsClient::new(Arc::new(transport));

    let first = ProductFilter::for_page(PageRequest::new(1, 10));
    let second = ProductFilter::for_page(PageRequest::new(2, 10));
    client.list(&first).await;
    client.list(&second).await;
    // Paging back is a pure cache hit; the times(1) expectations enforce it.
    let revisited = client.list(&first).await;

    assert_eq!(revisited.items()[0].product_name, "Boots");
}

#[tokio::test]
async fn name_search_is_forwarded_to_the_server() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            request.path == "/product/all"
                && request
                    .query
                    .contains(&("product_name".to_owned(), "boot".to_owned()))
                && request
                    .query
                    .contains(&("status".to_owned(), "Active".to_owned()))
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, product_body("Boots"))));
    let client = ProductsClient::new(Arc::new(transport));

    let filter = ProductFilter::default()
        .with_status(Status::Active)
        .with_name("boot");
    let snapshot = client.list(&filter).await;

    assert_eq!(snapshot.page_info().total, 1);
}

#[tokio::test]
async fn create_sends_a_json_body() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            let RequestBody::Json(body) = &request.body else {
                return false;
            };
            request.verb == Verb::Post
                && request.path == "/product/create"
                && body["product_name"] == "Boots"
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(201, json!({"success": true}))));
    let client = ProductsClient::new(Arc::new(transport));

    client
        .create(&ProductDraft::new("Boots", 59.5))
        .await
        .expect("create succeeds");
}

#[tokio::test]
async fn update_sends_a_multipart_body_with_encoded_collections() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            let RequestBody::Multipart(form) = &request.body else {
                return false;
            };
            request.verb == Verb::Put
                && request.path == "/product/update/p-1"
                && form.field_value("sizes") == Some(r#"["40"]"#)
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, json!({"success": true}))));
    let client = ProductsClient::new(Arc::new(transport));

    let mut draft = ProductDraft::new("Boots", 59.5);
    draft.sizes = vec!["40".to_owned()];
    let id = crate::domain::EntityId::new("p-1").expect("valid id");
    client.update(&id, &draft).await.expect("update succeeds");
}

#[tokio::test]
async fn invalid_draft_never_reaches_the_transport() {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    let client = ProductsClient::new(Arc::new(transport));

    let error = client
        .create(&ProductDraft::new("Boots", -1.0))
        .await
        .expect_err("negative price rejected");

    assert!(matches!(error, Error::Validation(_)));
}

#[tokio::test]
async fn unsupported_spreadsheet_never_reaches_the_transport() {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    let client = ProductsClient::new(Arc::new(transport));

    let file = SpreadsheetFile::from_bytes("report.pdf", vec![0_u8; 16]);
    let error = client
        .bulk_import(&file, Arc::new(NoOpUploadProgress))
        .await
        .expect_err("pdf rejected");

    assert!(matches!(
        error,
        Error::Validation(ValidationError::UnsupportedSpreadsheet { .. })
    ));
}

#[tokio::test]
async fn oversized_spreadsheet_never_reaches_the_transport() {
    let mut transport = MockTransport::new();
    transport.expect_send().times(0);
    let client = ProductsClient::new(Arc::new(transport));

    // Declared size at the ceiling, without allocating a gibibyte.
    let mut file = SpreadsheetFile::from_bytes("huge.xlsx", vec![0_u8; 16]);
    file.size = SIZE_LIMIT_BYTES;
    let error = client
        .bulk_import(&file, Arc::new(NoOpUploadProgress))
        .await
        .expect_err("oversized file rejected");

    assert!(matches!(
        error,
        Error::Validation(ValidationError::SpreadsheetTooLarge { .. })
    ));
}

#[tokio::test]
async fn bulk_import_posts_the_file_under_the_expected_field() {
    let mut transport = MockTransport::new();
    transport
        .expect_send()
        .withf(|request| {
            let RequestBody::Multipart(form) = &request.body else {
                return false;
            };
            request.verb == Verb::Post
                && request.path == "/product/upload-xlsx"
                && form.files.len() == 1
                && form.files[0].name == "excelFile"
                && form.progress.is_some()
        })
        .times(1)
        .returning(|_| Ok(ApiResponse::new(200, json!({"imported": 120}))));
    let client = ProductsClient::new(Arc::new(transport));

    let file = SpreadsheetFile::from_bytes("catalog.xlsx", vec![0_u8; 1024]);
    let progress: Arc<dyn UploadProgress> = Arc::new(NoOpUploadProgress);
    client
        .bulk_import(&file, progress)
        .await
        .expect("upload accepted");
}
