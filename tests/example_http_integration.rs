//! Integration tests for the example HTTP endpoints.
//!
//! These tests drive the assembled router in-process:
//! 1. Requests get routed, deserialized and answered with the right status
//! 2. Domain failures map to the documented status codes and error bodies
//! 3. Successful mutations publish lifecycle events to the configured channel
//!
//! The stack underneath is entirely in-memory; the partner is the mock.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::json;
use tower::ServiceExt;

use example_service::adapters::events::InMemoryEventPublisher;
use example_service::adapters::http::{app_router, ExampleAppState};
use example_service::adapters::memory::InMemoryExampleRepository;
use example_service::adapters::partner::MockPartnerApi;
use example_service::application::{ExampleService, ExampleUseCase};
use example_service::config::{LimitsConfig, ServerConfig};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    app: Router,
    publisher: Arc<InMemoryEventPublisher>,
    partner: Arc<MockPartnerApi>,
    repository: Arc<InMemoryExampleRepository>,
}

fn test_app() -> TestApp {
    let repository = Arc::new(InMemoryExampleRepository::new());
    let service = Arc::new(ExampleService::new(
        repository.clone(),
        LimitsConfig::default(),
    ));
    let partner = Arc::new(MockPartnerApi::new());
    let usecase = Arc::new(ExampleUseCase::new(
        service,
        partner.clone(),
        Duration::from_secs(1),
        Duration::from_secs(1),
    ));
    let publisher = Arc::new(InMemoryEventPublisher::new());
    let state = ExampleAppState::new(usecase, publisher.clone());

    TestApp {
        app: app_router(state, &ServerConfig::default()),
        publisher,
        partner,
        repository,
    }
}

/// Issue a request and return (status, parsed JSON body).
///
/// A 204 or otherwise empty body parses to `Value::Null`.
async fn request(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(value) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&value).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, body)
}

fn example_body(name: &str, email: &str, age: i32) -> serde_json::Value {
    json!({ "name": name, "email": email, "age": age })
}

async fn create_example(app: &Router, name: &str, email: &str, age: i32) -> serde_json::Value {
    let (status, body) = request(
        app,
        Method::POST,
        "/api/examples",
        Some(example_body(name, email, age)),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body
}

// =============================================================================
// Create
// =============================================================================

#[tokio::test]
async fn test_create_returns_created_with_stored_fields() {
    let harness = test_app();

    let body = create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;

    assert!(body["id"].is_string());
    assert_eq!(body["name"], "Jane Doe");
    assert_eq!(body["email"], "jane@example.com");
    assert_eq!(body["age"], 30);
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_publishes_created_event() {
    let harness = test_app();

    let body = create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;

    let events = harness.publisher.events_of_type("example.created");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].aggregate_id, body["id"].as_str().unwrap());
    assert_eq!(events[0].payload["email"], "jane@example.com");
    assert_eq!(events[0].metadata.source, "example-service");
    assert_eq!(events[0].metadata.version, "1.0");
}

#[tokio::test]
async fn test_create_duplicate_email_returns_conflict() {
    let harness = test_app();

    create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;
    let (status, body) = request(
        &harness.app,
        Method::POST,
        "/api/examples",
        Some(example_body("Other Jane", "jane@example.com", 25)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_EXISTS");
    // The failed attempt must not publish anything.
    assert_eq!(harness.publisher.events_of_type("example.created").len(), 1);
}

#[tokio::test]
async fn test_create_invalid_input_returns_bad_request() {
    let harness = test_app();

    let (status, body) = request(
        &harness.app,
        Method::POST,
        "/api/examples",
        Some(example_body("Jane Doe", "not-an-email", 30)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
    assert_eq!(body["details"]["field"], "email");
    assert!(harness.repository.is_empty().await);
}

#[tokio::test]
async fn test_create_business_rule_returns_unprocessable() {
    let harness = test_app();

    let (status, body) = request(
        &harness.app,
        Method::POST,
        "/api/examples",
        Some(example_body("Jane Doe", "jane@vip.com", 20)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "BUSINESS_RULE_VIOLATION");
}

#[tokio::test]
async fn test_create_with_malformed_json_is_rejected() {
    let harness = test_app();

    let response = harness
        .app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/api/examples")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

// =============================================================================
// Read
// =============================================================================

#[tokio::test]
async fn test_get_returns_enriched_example() {
    let harness = test_app();

    let created = create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;
    let uri = format!("/api/examples/{}", created["id"].as_str().unwrap());

    let (status, body) = request(&harness.app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert_eq!(body["email"], "jane@example.com");
    assert!(body["external_data"]["external_id"].is_string());
    assert!(body["enrichment"]["risk_score"].is_number());
}

#[tokio::test]
async fn test_get_omits_partner_slots_when_partner_is_down() {
    let harness = test_app();

    let created = create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;
    harness.partner.set_should_fail(true);
    let uri = format!("/api/examples/{}", created["id"].as_str().unwrap());

    let (status, body) = request(&harness.app, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], created["id"]);
    assert!(body.get("external_data").is_none());
    assert!(body.get("enrichment").is_none());
}

#[tokio::test]
async fn test_get_unknown_id_returns_not_found() {
    let harness = test_app();

    let (status, body) = request(
        &harness.app,
        Method::GET,
        "/api/examples/00000000-0000-4000-8000-000000000000",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "EXAMPLE_NOT_FOUND");
}

#[tokio::test]
async fn test_get_malformed_id_returns_bad_request() {
    let harness = test_app();

    let (status, body) =
        request(&harness.app, Method::GET, "/api/examples/not-a-uuid", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn test_get_by_email() {
    let harness = test_app();

    create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;

    let (status, body) = request(
        &harness.app,
        Method::GET,
        "/api/examples/email/jane@example.com",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "jane@example.com");

    let (missing_status, missing_body) = request(
        &harness.app,
        Method::GET,
        "/api/examples/email/nobody@example.com",
        None,
    )
    .await;
    assert_eq!(missing_status, StatusCode::NOT_FOUND);
    assert_eq!(missing_body["code"], "EXAMPLE_NOT_FOUND");
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_returns_ok_and_publishes_updated_event() {
    let harness = test_app();

    let created = create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;
    let uri = format!("/api/examples/{}", created["id"].as_str().unwrap());

    let (status, body) = request(
        &harness.app,
        Method::PUT,
        &uri,
        Some(example_body("Jane Smith", "jane.smith@example.com", 31)),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Jane Smith");
    assert_eq!(body["email"], "jane.smith@example.com");
    assert_eq!(body["age"], 31);

    let events = harness.publisher.events_of_type("example.updated");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].aggregate_id, created["id"].as_str().unwrap());
}

#[tokio::test]
async fn test_update_to_taken_email_returns_conflict() {
    let harness = test_app();

    create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;
    let second = create_example(&harness.app, "John Doe", "john@example.com", 40).await;
    let uri = format!("/api/examples/{}", second["id"].as_str().unwrap());

    let (status, body) = request(
        &harness.app,
        Method::PUT,
        &uri,
        Some(example_body("John Doe", "jane@example.com", 40)),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], "ALREADY_EXISTS");
    assert!(harness.publisher.events_of_type("example.updated").is_empty());
}

#[tokio::test]
async fn test_delete_returns_no_content_and_publishes_deleted_event() {
    let harness = test_app();

    let created = create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;
    let uri = format!("/api/examples/{}", created["id"].as_str().unwrap());

    let (status, body) = request(&harness.app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let events = harness.publisher.events_of_type("example.deleted");
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].aggregate_id, created["id"].as_str().unwrap());
    assert_eq!(events[0].payload["email"], "jane@example.com");

    let (after_status, _) = request(&harness.app, Method::GET, &uri, None).await;
    assert_eq!(after_status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Validated create
// =============================================================================

#[tokio::test]
async fn test_validated_create_returns_enriched_body() {
    let harness = test_app();

    let (status, body) = request(
        &harness.app,
        Method::POST,
        "/api/examples/validated",
        Some(example_body("Jane Doe", "jane@example.com", 30)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "jane@example.com");
    assert!(body["external_data"]["external_id"].is_string());
    assert!(body["enrichment"]["verification"].is_string());

    // The created event carries the enrichment that was attached.
    let events = harness.publisher.events_of_type("example.created");
    assert_eq!(events.len(), 1);
    assert!(events[0].payload["enrichment"]["risk_score"].is_number());
}

#[tokio::test]
async fn test_validated_create_rejected_by_partner_returns_unprocessable() {
    let harness = test_app();

    let (status, body) = request(
        &harness.app,
        Method::POST,
        "/api/examples/validated",
        Some(example_body("invalid", "jane@example.com", 30)),
    )
    .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "EXTERNAL_VALIDATION_REJECTED");
    assert!(harness.repository.is_empty().await);
    assert_eq!(harness.publisher.event_count(), 0);
}

#[tokio::test]
async fn test_validated_create_with_partner_down_returns_bad_gateway() {
    let harness = test_app();
    harness.partner.set_should_fail(true);

    let (status, body) = request(
        &harness.app,
        Method::POST,
        "/api/examples/validated",
        Some(example_body("Jane Doe", "jane@example.com", 30)),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "EXTERNAL_API_ERROR");
    assert!(harness.repository.is_empty().await);
}

// =============================================================================
// Listing
// =============================================================================

#[tokio::test]
async fn test_list_respects_query_parameters() {
    let harness = test_app();

    for i in 0..3 {
        create_example(
            &harness.app,
            &format!("Person {}", i),
            &format!("person{}@example.com", i),
            30,
        )
        .await;
    }

    let (status, body) = request(
        &harness.app,
        Method::GET,
        "/api/examples?limit=2&offset=0",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total"], 3);
    assert_eq!(body["limit"], 2);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["examples"].as_array().unwrap().len(), 2);

    let (_, rest) = request(
        &harness.app,
        Method::GET,
        "/api/examples?limit=2&offset=2",
        None,
    )
    .await;
    assert_eq!(rest["examples"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_without_parameters_uses_defaults() {
    let harness = test_app();

    create_example(&harness.app, "Jane Doe", "jane@example.com", 30).await;

    let (status, body) = request(&harness.app, Method::GET, "/api/examples", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["limit"], 10);
    assert_eq!(body["offset"], 0);
    assert_eq!(body["total"], 1);
}
