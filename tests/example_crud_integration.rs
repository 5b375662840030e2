//! Integration tests for the example CRUD flows.
//!
//! These tests drive the full application stack over in-memory adapters:
//! 1. Use case orchestration (partner fan-out, background notification)
//! 2. Service validation and business rules
//! 3. Repository uniqueness and pagination
//!
//! No external services are involved; the partner is the configurable mock.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;

use example_service::adapters::memory::InMemoryExampleRepository;
use example_service::adapters::partner::{MockPartnerApi, RecordedCall};
use example_service::application::{
    CreateExampleRequest, ExampleService, ExampleUseCase, ListExamplesRequest,
    UpdateExampleRequest,
};
use example_service::config::LimitsConfig;
use example_service::domain::example::ExampleError;
use example_service::domain::foundation::ExampleId;

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestStack {
    usecase: ExampleUseCase,
    repository: Arc<InMemoryExampleRepository>,
    partner: Arc<MockPartnerApi>,
}

fn test_stack() -> TestStack {
    let repository = Arc::new(InMemoryExampleRepository::new());
    let service = Arc::new(ExampleService::new(
        repository.clone(),
        LimitsConfig::default(),
    ));
    let partner = Arc::new(MockPartnerApi::new());
    let usecase = ExampleUseCase::new(
        service,
        partner.clone(),
        Duration::from_secs(1),
        Duration::from_secs(1),
    );

    TestStack {
        usecase,
        repository,
        partner,
    }
}

fn create_request(name: &str, email: &str, age: i32) -> CreateExampleRequest {
    CreateExampleRequest {
        name: name.to_string(),
        email: email.to_string(),
        age,
    }
}

/// Wait until the mock has recorded a creation notification.
///
/// The notification runs on a detached task, so the test has to poll; the
/// deadline keeps a broken spawn from hanging the suite.
async fn wait_for_notification(partner: &MockPartnerApi, id: ExampleId) {
    let deadline = tokio::time::Instant::now() + Duration::from_secs(2);
    loop {
        let notified = partner.calls().iter().any(
            |call| matches!(call, RecordedCall::NotifyCreated { id: seen, .. } if *seen == id),
        );
        if notified {
            return;
        }
        assert!(
            tokio::time::Instant::now() < deadline,
            "creation notification never reached the partner"
        );
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}

// =============================================================================
// Create / Read
// =============================================================================

#[tokio::test]
async fn test_create_then_get_roundtrip() {
    let stack = test_stack();

    let created = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let fetched = stack.usecase.get_example(created.id()).await.unwrap();

    assert_eq!(fetched.example.id(), created.id());
    assert_eq!(fetched.example.name(), "Jane Doe");
    assert_eq!(fetched.example.email(), "jane@example.com");
    assert_eq!(fetched.example.age(), 30);
    // Healthy partner means both enrichment slots arrive.
    assert!(fetched.external_data.is_some());
    assert!(fetched.enrichment.is_some());
}

#[tokio::test]
async fn test_create_notifies_partner_in_background() {
    let stack = test_stack();

    let created = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    wait_for_notification(&stack.partner, created.id()).await;
}

#[tokio::test]
async fn test_get_by_email() {
    let stack = test_stack();

    stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let found = stack
        .usecase
        .get_example_by_email("jane@example.com")
        .await
        .unwrap();
    assert_eq!(found.example.email(), "jane@example.com");

    let missing = stack.usecase.get_example_by_email("nobody@example.com").await;
    assert!(matches!(missing, Err(ExampleError::NotFound(_))));
}

#[tokio::test]
async fn test_get_unknown_id_is_not_found() {
    let stack = test_stack();

    let result = stack.usecase.get_example(ExampleId::new()).await;

    assert!(matches!(result, Err(ExampleError::NotFound(_))));
}

// =============================================================================
// Uniqueness
// =============================================================================

#[tokio::test]
async fn test_duplicate_email_is_rejected() {
    let stack = test_stack();

    stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let duplicate = stack
        .usecase
        .create_example(create_request("Other Jane", "jane@example.com", 25))
        .await;

    assert!(matches!(duplicate, Err(ExampleError::AlreadyExists(_))));
    assert_eq!(stack.repository.len().await, 1);
}

#[tokio::test]
async fn test_concurrent_creates_with_same_email_have_one_winner() {
    let stack = test_stack();
    let usecase = Arc::new(stack.usecase);

    let attempts = (0..10).map(|i| {
        let usecase = usecase.clone();
        tokio::spawn(async move {
            usecase
                .create_example(create_request(
                    &format!("Racer {}", i),
                    "contested@example.com",
                    30,
                ))
                .await
        })
    });

    let outcomes = join_all(attempts).await;
    let successes = outcomes
        .into_iter()
        .map(|handle| handle.unwrap())
        .filter(Result::is_ok)
        .count();

    assert_eq!(successes, 1);
    assert_eq!(stack.repository.len().await, 1);
}

// =============================================================================
// Validation and business rules
// =============================================================================

#[tokio::test]
async fn test_malformed_input_is_rejected_before_storage() {
    let stack = test_stack();

    let empty_name = stack
        .usecase
        .create_example(create_request("", "jane@example.com", 30))
        .await;
    let bad_email = stack
        .usecase
        .create_example(create_request("Jane Doe", "not-an-email", 30))
        .await;
    let bad_age = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 151))
        .await;

    assert!(matches!(empty_name, Err(ExampleError::Validation(_))));
    assert!(matches!(bad_email, Err(ExampleError::Validation(_))));
    assert!(matches!(bad_age, Err(ExampleError::Validation(_))));
    assert!(stack.repository.is_empty().await);
}

#[tokio::test]
async fn test_business_rules_gate_creation() {
    let stack = test_stack();

    let blocked_name = stack
        .usecase
        .create_example(create_request("badword1", "jane@example.com", 30))
        .await;
    let underage_corporate = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@corp.com", 17))
        .await;
    let underage_vip = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@vip.com", 20))
        .await;
    let adult_corporate = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@corp.com", 18))
        .await;

    assert!(matches!(blocked_name, Err(ExampleError::BusinessRule(_))));
    assert!(matches!(
        underage_corporate,
        Err(ExampleError::BusinessRule(_))
    ));
    assert!(matches!(underage_vip, Err(ExampleError::BusinessRule(_))));
    assert!(adult_corporate.is_ok());
}

// =============================================================================
// Update / Delete
// =============================================================================

#[tokio::test]
async fn test_update_changes_fields_and_bumps_updated_at() {
    let stack = test_stack();

    let created = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let updated = stack
        .usecase
        .update_example(
            created.id(),
            UpdateExampleRequest {
                name: "Jane Smith".to_string(),
                email: "jane.smith@example.com".to_string(),
                age: 31,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.example.name(), "Jane Smith");
    assert_eq!(updated.example.email(), "jane.smith@example.com");
    assert_eq!(updated.example.age(), 31);
    assert_eq!(updated.example.created_at(), created.created_at());
    assert!(!updated.example.updated_at().is_before(&created.updated_at()));
}

#[tokio::test]
async fn test_update_to_taken_email_conflicts() {
    let stack = test_stack();

    stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();
    let second = stack
        .usecase
        .create_example(create_request("John Doe", "john@example.com", 40))
        .await
        .unwrap();

    let conflict = stack
        .usecase
        .update_example(
            second.id(),
            UpdateExampleRequest {
                name: "John Doe".to_string(),
                email: "jane@example.com".to_string(),
                age: 40,
            },
        )
        .await;

    assert!(matches!(conflict, Err(ExampleError::AlreadyExists(_))));
}

#[tokio::test]
async fn test_update_keeping_own_email_succeeds() {
    let stack = test_stack();

    let created = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let updated = stack
        .usecase
        .update_example(
            created.id(),
            UpdateExampleRequest {
                name: "Jane Renamed".to_string(),
                email: "jane@example.com".to_string(),
                age: 30,
            },
        )
        .await
        .unwrap();

    assert_eq!(updated.example.name(), "Jane Renamed");
    assert_eq!(updated.example.email(), "jane@example.com");
}

#[tokio::test]
async fn test_delete_returns_entity_and_removes_it() {
    let stack = test_stack();

    let created = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let deleted = stack.usecase.delete_example(created.id()).await.unwrap();
    assert_eq!(deleted.id(), created.id());
    assert_eq!(deleted.email(), "jane@example.com");

    let gone = stack.usecase.get_example(created.id()).await;
    assert!(matches!(gone, Err(ExampleError::NotFound(_))));
    assert!(stack.repository.is_empty().await);
}

// =============================================================================
// Listing and pagination
// =============================================================================

#[tokio::test]
async fn test_pagination_sweep_covers_every_example_once() {
    let stack = test_stack();

    for i in 0..25 {
        stack
            .usecase
            .create_example(create_request(
                &format!("Person {}", i),
                &format!("person{}@example.com", i),
                20 + (i % 50),
            ))
            .await
            .unwrap();
    }

    let mut seen = HashSet::new();
    let mut page_sizes = Vec::new();
    for page_index in 0..3 {
        let page = stack
            .usecase
            .list_examples(ListExamplesRequest {
                limit: 10,
                offset: page_index * 10,
            })
            .await
            .unwrap();

        assert_eq!(page.total, 25);
        assert_eq!(page.limit, 10);
        assert_eq!(page.offset, page_index * 10);

        page_sizes.push(page.examples.len());
        for item in &page.examples {
            // Enrichment never interferes with pagination.
            assert!(item.external_data.is_some());
            assert!(
                seen.insert(item.example.email().to_string()),
                "example returned on more than one page"
            );
        }
    }

    assert_eq!(page_sizes, vec![10, 10, 5]);
    assert_eq!(seen.len(), 25);
}

#[tokio::test]
async fn test_pagination_bounds_are_clamped() {
    let stack = test_stack();

    stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    let defaulted = stack
        .usecase
        .list_examples(ListExamplesRequest {
            limit: 0,
            offset: -5,
        })
        .await
        .unwrap();
    assert_eq!(defaulted.limit, 10);
    assert_eq!(defaulted.offset, 0);

    let capped = stack
        .usecase
        .list_examples(ListExamplesRequest {
            limit: 1000,
            offset: 0,
        })
        .await
        .unwrap();
    assert_eq!(capped.limit, 100);
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let stack = test_stack();

    for i in 0..3 {
        stack
            .usecase
            .create_example(create_request(
                &format!("Person {}", i),
                &format!("person{}@example.com", i),
                30,
            ))
            .await
            .unwrap();
        // Distinct creation instants make the expected order unambiguous.
        tokio::time::sleep(Duration::from_millis(5)).await;
    }

    let page = stack
        .usecase
        .list_examples(ListExamplesRequest {
            limit: 10,
            offset: 0,
        })
        .await
        .unwrap();

    let emails: Vec<_> = page
        .examples
        .iter()
        .map(|item| item.example.email().to_string())
        .collect();
    assert_eq!(
        emails,
        vec![
            "person2@example.com",
            "person1@example.com",
            "person0@example.com"
        ]
    );
}

// =============================================================================
// Partner orchestration
// =============================================================================

#[tokio::test]
async fn test_validated_create_rejected_by_partner() {
    let stack = test_stack();

    // "invalid" is the name the mock refuses.
    let result = stack
        .usecase
        .validate_and_create_example(create_request("invalid", "jane@example.com", 30))
        .await;

    assert!(matches!(result, Err(ExampleError::Rejected { .. })));
    assert!(stack.repository.is_empty().await);
}

#[tokio::test]
async fn test_validated_create_fails_when_partner_is_down() {
    let stack = test_stack();
    stack.partner.set_should_fail(true);

    let result = stack
        .usecase
        .validate_and_create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await;

    assert!(matches!(result, Err(ExampleError::External { .. })));
    assert!(stack.repository.is_empty().await);
}

#[tokio::test]
async fn test_validated_create_attaches_enrichment() {
    let stack = test_stack();

    let enriched = stack
        .usecase
        .validate_and_create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    assert_eq!(enriched.example.email(), "jane@example.com");
    assert!(enriched.external_data.is_some());
    assert!(enriched.enrichment.is_some());
    assert_eq!(stack.repository.len().await, 1);
}

#[tokio::test]
async fn test_reads_survive_partner_outage() {
    let stack = test_stack();

    let created = stack
        .usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    stack.partner.set_should_fail(true);
    let degraded = stack.usecase.get_example(created.id()).await.unwrap();
    assert!(degraded.external_data.is_none());
    assert!(degraded.enrichment.is_none());

    stack.partner.set_should_fail(false);
    let recovered = stack.usecase.get_example(created.id()).await.unwrap();
    assert!(recovered.external_data.is_some());
    assert!(recovered.enrichment.is_some());
}

#[tokio::test]
async fn test_slow_partner_calls_time_out_without_failing_reads() {
    let repository = Arc::new(InMemoryExampleRepository::new());
    let service = Arc::new(ExampleService::new(
        repository.clone(),
        LimitsConfig::default(),
    ));
    let partner = Arc::new(MockPartnerApi::new());
    // Timeout far below the partner's simulated latency.
    let usecase = ExampleUseCase::new(
        service,
        partner.clone(),
        Duration::from_millis(50),
        Duration::from_secs(1),
    );

    let created = usecase
        .create_example(create_request("Jane Doe", "jane@example.com", 30))
        .await
        .unwrap();

    partner.set_delay(Duration::from_millis(500));
    let fetched = usecase.get_example(created.id()).await.unwrap();

    assert_eq!(fetched.example.id(), created.id());
    assert!(fetched.external_data.is_none());
    assert!(fetched.enrichment.is_none());
}
