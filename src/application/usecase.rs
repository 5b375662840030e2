//! ExampleUseCase - Orchestration of example operations with the partner API.
//!
//! Wraps [`ExampleService`] and decorates its results with partner data.
//! The partner is treated as untrusted on read paths: every enrichment call
//! is bounded by a timeout and a failure downgrades the response instead of
//! failing it. Only the explicit validation call on
//! [`ExampleUseCase::validate_and_create_example`] is allowed to veto an
//! operation.

use std::sync::Arc;
use std::time::Duration;

use crate::application::service::{ExamplePage, ExampleService};
use crate::domain::example::{Example, ExampleError};
use crate::domain::foundation::ExampleId;
use crate::ports::{EnrichmentData, ExternalData, PartnerApi, PartnerError};

/// Input for creating an example.
#[derive(Debug, Clone)]
pub struct CreateExampleRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Input for replacing an example's fields.
#[derive(Debug, Clone)]
pub struct UpdateExampleRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Raw pagination input; clamping happens in the service.
#[derive(Debug, Clone, Copy)]
pub struct ListExamplesRequest {
    pub limit: i64,
    pub offset: i64,
}

/// An example plus whatever partner data could be attached in time.
///
/// `None` in either slot means that partner call failed or timed out for
/// this response; the example itself is always authoritative.
#[derive(Debug, Clone)]
pub struct EnrichedExample {
    pub example: Example,
    pub external_data: Option<ExternalData>,
    pub enrichment: Option<EnrichmentData>,
}

/// One page of enriched examples with pagination metadata.
#[derive(Debug, Clone)]
pub struct EnrichedExamplePage {
    pub examples: Vec<EnrichedExample>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

/// Orchestrates example operations against the service and the partner API.
pub struct ExampleUseCase {
    service: Arc<ExampleService>,
    partner: Arc<dyn PartnerApi>,
    partner_timeout: Duration,
    notification_timeout: Duration,
}

impl ExampleUseCase {
    pub fn new(
        service: Arc<ExampleService>,
        partner: Arc<dyn PartnerApi>,
        partner_timeout: Duration,
        notification_timeout: Duration,
    ) -> Self {
        Self {
            service,
            partner,
            partner_timeout,
            notification_timeout,
        }
    }

    /// Create an example and notify the partner in the background.
    ///
    /// The response carries no partner data: callers that want the enriched
    /// view fetch it afterwards. The notification runs on a detached task
    /// with its own deadline and cannot fail the creation.
    ///
    /// # Errors
    ///
    /// Same as [`ExampleService::create_example`].
    pub async fn create_example(
        &self,
        request: CreateExampleRequest,
    ) -> Result<Example, ExampleError> {
        let example = self
            .service
            .create_example(request.name, request.email, request.age)
            .await?;

        self.spawn_notification(&example);

        Ok(example)
    }

    /// Fetch an example by ID with best-effort partner data attached.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no example has this id
    pub async fn get_example(&self, id: ExampleId) -> Result<EnrichedExample, ExampleError> {
        let example = self.service.get_example_by_id(id).await?;
        Ok(self.enrich_example(example).await)
    }

    /// Fetch an example by email with best-effort partner data attached.
    ///
    /// # Errors
    ///
    /// - `Validation` if the email is empty
    /// - `NotFound` if no example has this email
    pub async fn get_example_by_email(
        &self,
        email: &str,
    ) -> Result<EnrichedExample, ExampleError> {
        let example = self.service.get_example_by_email(email).await?;
        Ok(self.enrich_example(example).await)
    }

    /// Update an example and return the enriched result.
    ///
    /// # Errors
    ///
    /// Same as [`ExampleService::update_example`].
    pub async fn update_example(
        &self,
        id: ExampleId,
        request: UpdateExampleRequest,
    ) -> Result<EnrichedExample, ExampleError> {
        let example = self
            .service
            .update_example(id, request.name, request.email, request.age)
            .await?;
        Ok(self.enrich_example(example).await)
    }

    /// Delete an example by ID, returning its final state.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the id does not exist
    pub async fn delete_example(&self, id: ExampleId) -> Result<Example, ExampleError> {
        self.service.delete_example(id).await
    }

    /// List examples with best-effort enrichment of every element.
    ///
    /// Enrichment runs per element; one element's partner failure never
    /// affects its neighbors or the page itself.
    pub async fn list_examples(
        &self,
        request: ListExamplesRequest,
    ) -> Result<EnrichedExamplePage, ExampleError> {
        let ExamplePage {
            examples,
            total,
            limit,
            offset,
        } = self
            .service
            .list_examples(request.limit, request.offset)
            .await?;

        let mut enriched = Vec::with_capacity(examples.len());
        for example in examples {
            enriched.push(self.enrich_example(example).await);
        }

        Ok(EnrichedExamplePage {
            examples: enriched,
            total,
            limit,
            offset,
        })
    }

    /// Create an example only if the partner accepts it first.
    ///
    /// Unlike enrichment, the validation call is load-bearing: a partner
    /// refusal, failure, or timeout aborts the operation before anything is
    /// persisted. On acceptance the example goes through the normal create
    /// path, is enriched, and the partner is notified in the background.
    ///
    /// # Errors
    ///
    /// - `Rejected` if the partner explicitly refuses the input
    /// - `External` if the validation call fails or times out
    /// - Otherwise same as [`ExampleService::create_example`]
    pub async fn validate_and_create_example(
        &self,
        request: CreateExampleRequest,
    ) -> Result<EnrichedExample, ExampleError> {
        let verdict = match tokio::time::timeout(
            self.partner_timeout,
            self.partner
                .validate(&request.name, &request.email, request.age),
        )
        .await
        {
            Ok(Ok(verdict)) => verdict,
            Ok(Err(err)) => {
                return Err(ExampleError::external(&request.name, &request.email, err));
            }
            Err(_) => {
                return Err(ExampleError::external(
                    &request.name,
                    &request.email,
                    PartnerError::timeout("validation call exceeded its deadline"),
                ));
            }
        };

        if !verdict {
            return Err(ExampleError::rejected(&request.name, &request.email));
        }

        let example = self
            .service
            .create_example(request.name, request.email, request.age)
            .await?;

        let enriched = self.enrich_example(example).await;
        self.spawn_notification(&enriched.example);

        Ok(enriched)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Partner plumbing
    // ─────────────────────────────────────────────────────────────────────────

    /// Attach partner data to an example. Infallible.
    ///
    /// Both partner calls run concurrently under the same deadline, each
    /// outcome is applied independently, and a failure or timeout leaves
    /// the corresponding slot empty.
    async fn enrich_example(&self, example: Example) -> EnrichedExample {
        let id = example.id();

        let (fetched, enriched) = tokio::join!(
            tokio::time::timeout(self.partner_timeout, self.partner.fetch_data(id)),
            tokio::time::timeout(self.partner_timeout, self.partner.enrich(id)),
        );

        let external_data = match fetched {
            Ok(Ok(data)) => Some(data),
            Ok(Err(err)) => {
                tracing::warn!(example_id = %id, error = %err, "Partner data fetch failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    example_id = %id,
                    timeout_ms = self.partner_timeout.as_millis() as u64,
                    "Partner data fetch timed out"
                );
                None
            }
        };

        let enrichment = match enriched {
            Ok(Ok(data)) => Some(data),
            Ok(Err(err)) => {
                tracing::warn!(example_id = %id, error = %err, "Partner enrichment failed");
                None
            }
            Err(_) => {
                tracing::warn!(
                    example_id = %id,
                    timeout_ms = self.partner_timeout.as_millis() as u64,
                    "Partner enrichment timed out"
                );
                None
            }
        };

        EnrichedExample {
            example,
            external_data,
            enrichment,
        }
    }

    /// Notify the partner about a new example on a detached task.
    ///
    /// The task carries its own deadline, so it keeps running after the
    /// request that spawned it completes. Failures are logged, never
    /// surfaced.
    fn spawn_notification(&self, example: &Example) {
        let partner = Arc::clone(&self.partner);
        let deadline = self.notification_timeout;
        let id = example.id();
        let email = example.email().to_string();

        tokio::spawn(async move {
            match tokio::time::timeout(deadline, partner.notify_created(id, &email)).await {
                Ok(Ok(())) => {
                    tracing::debug!(example_id = %id, "Partner notified of new example");
                }
                Ok(Err(err)) => {
                    tracing::warn!(example_id = %id, error = %err, "Partner notification failed");
                }
                Err(_) => {
                    tracing::warn!(example_id = %id, "Partner notification timed out");
                }
            }
        });
    }
}
