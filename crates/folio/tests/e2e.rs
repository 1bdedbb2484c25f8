// SPDX-FileCopyrightText: 2026 Folio Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end HTTP tests for the contact service.
//!
//! Each test builds an isolated TestHarness and drives the axum router
//! in-process. Tests are independent and order-insensitive.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};

use folio_config::model::ListingConfig;
use folio_test_utils::{Fault, MockStore, TestHarness};

fn jane() -> Value {
    json!({
        "name": "Jane Doe",
        "email": "JANE@Example.COM",
        "subject": "Hi",
        "message": "Hello there"
    })
}

fn numbered(i: usize) -> Value {
    json!({
        "name": format!("Sender {i:02}"),
        "email": format!("sender{i}@example.com"),
        "subject": "Inquiry",
        "message": "Hello"
    })
}

// ---- Write path ----

#[tokio::test]
async fn submission_stores_lowercased_email() {
    let harness = TestHarness::new().await.unwrap();

    let (status, body) = harness.post_json("/api/contact", &jane()).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Contact form submitted successfully");
    let id = body["id"].as_str().unwrap().to_string();

    let records = harness.mock().unwrap().records().await;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id.0, id);
    assert_eq!(records[0].record.email, "jane@example.com");
    assert_eq!(records[0].record.status, "new");
}

#[tokio::test]
async fn empty_name_is_rejected_with_missing_field() {
    let harness = TestHarness::new().await.unwrap();

    let (status, body) = harness
        .post_json(
            "/api/contact",
            &json!({"name": "", "email": "a@b.com", "subject": "Hi", "message": "Hello"}),
        )
        .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "All fields are required"}));
    let mock = harness.mock().unwrap();
    assert!(mock.is_empty().await);
    assert_eq!(mock.opened(), 0);
}

#[tokio::test]
async fn absent_field_is_rejected_with_missing_field() {
    let harness = TestHarness::new().await.unwrap();
    let (status, body) = harness
        .post_json(
            "/api/contact",
            &json!({"name": "Jane", "email": "a@b.com", "subject": "Hi"}),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "All fields are required");
}

#[tokio::test]
async fn malformed_email_is_rejected() {
    let harness = TestHarness::new().await.unwrap();
    for email in ["jane.example.com", "jane@example", "ja ne@example.com"] {
        let mut payload = jane();
        payload["email"] = json!(email);
        let (status, body) = harness.post_json("/api/contact", &payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{email}");
        assert_eq!(body["error"], "Invalid email format");
    }
    assert!(harness.mock().unwrap().is_empty().await);
}

#[tokio::test]
async fn unreadable_bodies_are_bad_requests() {
    let harness = TestHarness::new().await.unwrap();

    let (status, body) = harness.post_raw("/api/contact", "{not json".into()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");

    let mut extra = jane();
    extra["phone"] = json!("555-0100");
    let (status, body) = harness.post_json("/api/contact", &extra).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid request body");

    let mut wrong_type = jane();
    wrong_type["name"] = json!(42);
    let (status, _) = harness.post_json("/api/contact", &wrong_type).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert_eq!(harness.mock().unwrap().opened(), 0);
}

#[tokio::test]
async fn json_body_is_accepted_whatever_the_content_type() {
    let harness = TestHarness::new().await.unwrap();

    let bare = Request::post("/api/contact")
        .body(Body::from(jane().to_string()))
        .unwrap();
    let (status, body) = harness.send(bare).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let text = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "text/plain;charset=UTF-8")
        .body(Body::from(jane().to_string()))
        .unwrap();
    let (status, body) = harness.send(text).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    assert_eq!(harness.mock().unwrap().len().await, 2);
}

#[tokio::test]
async fn padded_email_is_rejected() {
    let harness = TestHarness::new().await.unwrap();
    let mut padded = jane();
    padded["email"] = json!("  jane@example.com ");

    let (status, body) = harness.post_json("/api/contact", &padded).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");
    assert_eq!(harness.mock().unwrap().opened(), 0);
}

#[tokio::test]
async fn identical_submissions_create_two_records() {
    let harness = TestHarness::new().await.unwrap();

    let (_, first) = harness.post_json("/api/contact", &jane()).await;
    let (_, second) = harness.post_json("/api/contact", &jane()).await;

    assert_ne!(first["id"], second["id"]);
    assert_eq!(harness.mock().unwrap().len().await, 2);
}

#[tokio::test]
async fn client_metadata_comes_from_headers() {
    let harness = TestHarness::new().await.unwrap();
    let request = Request::post("/api/contact")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::USER_AGENT, "Mozilla/5.0 (X11; Linux x86_64)")
        .header("x-forwarded-for", "198.51.100.23, 10.0.0.1")
        .body(Body::from(jane().to_string()))
        .unwrap();

    let (status, _) = harness.send(request).await;
    assert_eq!(status, StatusCode::OK);

    let record = &harness.mock().unwrap().records().await[0].record;
    assert_eq!(record.ip_address, "198.51.100.23");
    assert_eq!(record.user_agent, "Mozilla/5.0 (X11; Linux x86_64)");
}

#[tokio::test]
async fn metadata_defaults_to_unknown() {
    let harness = TestHarness::new().await.unwrap();
    harness.post_json("/api/contact", &jane()).await;
    let record = &harness.mock().unwrap().records().await[0].record;
    assert_eq!(record.ip_address, "unknown");
    assert_eq!(record.user_agent, "unknown");
}

// ---- Failure handling ----

#[tokio::test]
async fn missing_configuration_fails_both_paths() {
    let harness = TestHarness::builder().unconfigured().build().await.unwrap();

    let (status, body) = harness.post_json("/api/contact", &jane()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Database connection not configured");
    assert_eq!(
        body["message"],
        "Failed to process your message. Please try again later."
    );
    assert!(body["details"].is_string());

    let (status, body) = harness.get("/api/contact").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Database connection not configured"}));
}

#[tokio::test]
async fn validation_precedes_configuration_check() {
    let harness = TestHarness::builder().unconfigured().build().await.unwrap();
    let mut payload = jane();
    payload["email"] = json!("nope");
    let (status, body) = harness.post_json("/api/contact", &payload).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid email format");
}

#[tokio::test]
async fn store_outage_is_internal_error() {
    let store = MockStore::with_fault(Fault::FailInsert);
    let harness = TestHarness::builder()
        .with_mock_store(store.clone())
        .build()
        .await
        .unwrap();

    let (status, body) = harness.post_json("/api/contact", &jane()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["details"], "mock: insert failed");
    assert!(store.is_empty().await);
    assert_eq!(store.opened(), store.released());
}

#[tokio::test]
async fn listing_outage_is_reported_generically() {
    let store = MockStore::with_fault(Fault::FailQuery);
    let harness = TestHarness::builder()
        .with_mock_store(store.clone())
        .build()
        .await
        .unwrap();

    let (status, body) = harness.get("/api/contact").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to retrieve messages"}));
    assert_eq!(store.active(), 0);
}

#[tokio::test(start_paused = true)]
async fn hung_store_times_out_and_releases_leases() {
    let store = MockStore::with_fault(Fault::Hang);
    let harness = TestHarness::builder()
        .with_mock_store(store.clone())
        .with_timeout(Duration::from_secs(2))
        .build()
        .await
        .unwrap();

    let (status, body) = harness.post_json("/api/contact", &jane()).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["details"].as_str().unwrap().contains("timed out"));

    let (status, _) = harness.get("/api/contact").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert_eq!(store.opened(), 2);
    assert_eq!(store.released(), 2);
}

// ---- Read path ----

#[tokio::test]
async fn listing_pages_fifteen_records() {
    let harness = TestHarness::new().await.unwrap();
    for i in 0..15 {
        let (status, _) = harness.post_json("/api/contact", &numbered(i)).await;
        assert_eq!(status, StatusCode::OK);
        // Distinct timestamps keep the ordering assertion independent of tie-breaking.
        tokio::time::sleep(Duration::from_millis(2)).await;
    }

    let (status, first) = harness.get("/api/contact?skip=0&limit=10").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(first["messages"].as_array().unwrap().len(), 10);
    assert_eq!(first["total"], 15);
    assert_eq!(first["page"], 1);
    assert_eq!(first["totalPages"], 2);
    assert_eq!(first["messages"][0]["name"], "Sender 14");

    let stamps: Vec<&str> = first["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["submittedAt"].as_str().unwrap())
        .collect();
    let mut sorted = stamps.clone();
    sorted.sort_by(|a, b| b.cmp(a));
    assert_eq!(stamps, sorted);

    let (_, second) = harness.get("/api/contact?skip=10&limit=10").await;
    assert_eq!(second["messages"].as_array().unwrap().len(), 5);
    assert_eq!(second["page"], 2);
    assert_eq!(second["messages"][4]["name"], "Sender 00");

    let mock = harness.mock().unwrap();
    assert_eq!(mock.opened(), mock.released());
}

#[tokio::test]
async fn listing_records_carry_ids_and_camel_case_fields() {
    let harness = TestHarness::new().await.unwrap();
    let (_, created) = harness.post_json("/api/contact", &jane()).await;

    let (_, page) = harness.get("/api/contact").await;
    let record = &page["messages"][0];
    assert_eq!(record["_id"], created["id"]);
    assert!(record["submittedAt"].is_string());
    assert_eq!(record["ipAddress"], "unknown");
    assert_eq!(record["userAgent"], "unknown");
    assert_eq!(record["status"], "new");
}

#[tokio::test]
async fn garbage_paging_parameters_use_defaults() {
    let harness = TestHarness::new().await.unwrap();
    for i in 0..12 {
        harness.post_json("/api/contact", &numbered(i)).await;
    }

    let (status, page) = harness.get("/api/contact?limit=lots&skip=-7").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page["messages"].as_array().unwrap().len(), 10);
    assert_eq!(page["page"], 1);
    assert_eq!(page["totalPages"], 2);
}

#[tokio::test]
async fn configured_cap_limits_page_size() {
    let harness = TestHarness::builder()
        .with_listing(ListingConfig {
            default_limit: 10,
            max_limit: Some(3),
        })
        .build()
        .await
        .unwrap();
    for i in 0..5 {
        harness.post_json("/api/contact", &numbered(i)).await;
    }

    let (_, page) = harness.get("/api/contact?limit=500").await;
    assert_eq!(page["messages"].as_array().unwrap().len(), 3);
    assert_eq!(page["totalPages"], 2);
}

#[tokio::test]
async fn empty_listing() {
    let harness = TestHarness::new().await.unwrap();
    let (status, page) = harness.get("/api/contact").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page, json!({"messages": [], "total": 0, "page": 1, "totalPages": 0}));
}

// ---- SQLite-backed round trip ----

#[tokio::test]
async fn sqlite_store_round_trip() {
    let harness = TestHarness::builder().with_sqlite().build().await.unwrap();

    for i in 0..3 {
        let (status, _) = harness.post_json("/api/contact", &numbered(i)).await;
        assert_eq!(status, StatusCode::OK);
        tokio::time::sleep(Duration::from_millis(2)).await;
    }
    let (status, _) = harness.post_json("/api/contact", &jane()).await;
    assert_eq!(status, StatusCode::OK);

    let (_, page) = harness.get("/api/contact?limit=2").await;
    assert_eq!(page["total"], 4);
    assert_eq!(page["totalPages"], 2);
    assert_eq!(page["messages"][0]["email"], "jane@example.com");
    assert_eq!(page["messages"][1]["name"], "Sender 02");
}

// ---- Diagnostics ----

#[tokio::test]
async fn api_test_endpoints() {
    let harness = TestHarness::new().await.unwrap();

    let (status, body) = harness.get("/api/test").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "API is working!");
    assert_eq!(body["environment"]["storageConfigured"], true);
    assert_eq!(body["environment"]["database"], "portfolio");

    let request = Request::post("/api/test").body(Body::empty()).unwrap();
    let (status, body) = harness.send(request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "POST endpoint is working!");
    assert!(body["timestamp"].is_string());

    assert_eq!(harness.mock().unwrap().opened(), 0);
}

#[tokio::test]
async fn health_reports_storage_state() {
    let harness = TestHarness::new().await.unwrap();
    let (status, body) = harness.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["storage"], "healthy");
    assert!(body["uptimeSecs"].is_u64());

    let harness = TestHarness::builder().unconfigured().build().await.unwrap();
    let (_, body) = harness.get("/health").await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["storage"], "unconfigured");

    let harness = TestHarness::builder()
        .with_mock_store(MockStore::with_fault(Fault::FailConnect))
        .build()
        .await
        .unwrap();
    let (_, body) = harness.get("/health").await;
    assert!(body["storage"].as_str().unwrap().starts_with("unhealthy"));
}
