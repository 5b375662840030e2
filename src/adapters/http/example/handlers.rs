//! HTTP handlers for example endpoints.
//!
//! Handlers translate between the wire and the use case layer, and publish
//! lifecycle events after successful mutations. Event publishing is
//! best-effort: the mutation has already committed, so a dead channel is
//! logged rather than turned into an error response.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::application::{self, ExampleUseCase};
use crate::domain::example::{
    Example, ExampleCreated, ExampleDeleted, ExampleError, ExampleUpdated,
};
use crate::domain::foundation::{
    ErrorCode, EventEnvelope, EventId, EventMetadata, ExampleId,
};
use crate::ports::{EnrichmentData, EventPublisher};

use super::dto::{
    CreateExampleRequest, EnrichedExampleResponse, ErrorResponse, ExampleResponse,
    ListExamplesParams, ListExamplesResponse, UpdateExampleRequest,
};

/// Source stamped into every published envelope's metadata.
const EVENT_SOURCE: &str = "example-service";
/// Event contract version stamped into every published envelope's metadata.
const EVENT_CONTRACT_VERSION: &str = "1.0";

// ════════════════════════════════════════════════════════════════════════════
// Application state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for example handlers.
///
/// Cloned per request; dependencies are Arc-wrapped for cheap sharing.
#[derive(Clone)]
pub struct ExampleAppState {
    pub usecase: Arc<ExampleUseCase>,
    pub publisher: Arc<dyn EventPublisher>,
}

impl ExampleAppState {
    pub fn new(usecase: Arc<ExampleUseCase>, publisher: Arc<dyn EventPublisher>) -> Self {
        Self { usecase, publisher }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/examples - Create a new example
pub async fn create_example(
    State(state): State<ExampleAppState>,
    Json(req): Json<CreateExampleRequest>,
) -> Response {
    let request = application::CreateExampleRequest {
        name: req.name,
        email: req.email,
        age: req.age,
    };

    match state.usecase.create_example(request).await {
        Ok(example) => {
            publish_created(&state, &example, None).await;
            let response: ExampleResponse = example.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

/// POST /api/examples/validated - Create after an explicit partner validation
pub async fn validate_and_create_example(
    State(state): State<ExampleAppState>,
    Json(req): Json<CreateExampleRequest>,
) -> Response {
    let request = application::CreateExampleRequest {
        name: req.name,
        email: req.email,
        age: req.age,
    };

    match state.usecase.validate_and_create_example(request).await {
        Ok(enriched) => {
            publish_created(&state, &enriched.example, enriched.enrichment.clone()).await;
            let response: EnrichedExampleResponse = enriched.into();
            (StatusCode::CREATED, Json(response)).into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

/// GET /api/examples - List examples with pagination
pub async fn list_examples(
    State(state): State<ExampleAppState>,
    Query(params): Query<ListExamplesParams>,
) -> Response {
    let request = application::ListExamplesRequest {
        limit: params.limit.unwrap_or(0),
        offset: params.offset.unwrap_or(0),
    };

    match state.usecase.list_examples(request).await {
        Ok(page) => {
            let response: ListExamplesResponse = page.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

/// GET /api/examples/:id - Get an example with partner data attached
pub async fn get_example(
    State(state): State<ExampleAppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_example_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.usecase.get_example(id).await {
        Ok(enriched) => {
            let response: EnrichedExampleResponse = enriched.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

/// GET /api/examples/email/:email - Look up an example by email
pub async fn get_example_by_email(
    State(state): State<ExampleAppState>,
    Path(email): Path<String>,
) -> Response {
    match state.usecase.get_example_by_email(&email).await {
        Ok(enriched) => {
            let response: EnrichedExampleResponse = enriched.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

/// PUT /api/examples/:id - Replace an example's mutable fields
pub async fn update_example(
    State(state): State<ExampleAppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateExampleRequest>,
) -> Response {
    let id = match parse_example_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    let request = application::UpdateExampleRequest {
        name: req.name,
        email: req.email,
        age: req.age,
    };

    match state.usecase.update_example(id, request).await {
        Ok(enriched) => {
            publish_updated(&state, &enriched.example).await;
            let response: EnrichedExampleResponse = enriched.into();
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

/// DELETE /api/examples/:id - Delete an example
pub async fn delete_example(
    State(state): State<ExampleAppState>,
    Path(id): Path<String>,
) -> Response {
    let id = match parse_example_id(&id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match state.usecase.delete_example(id).await {
        Ok(deleted) => {
            publish_deleted(&state, &deleted).await;
            StatusCode::NO_CONTENT.into_response()
        }
        Err(e) => handle_example_error(e),
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Event publishing
// ════════════════════════════════════════════════════════════════════════════

async fn publish_created(
    state: &ExampleAppState,
    example: &Example,
    enrichment: Option<EnrichmentData>,
) {
    let event = ExampleCreated {
        event_id: EventId::new(),
        example_id: example.id(),
        name: example.name().to_string(),
        email: example.email().to_string(),
        age: example.age(),
        enrichment: enrichment.map(serde_json::Value::Object),
        created_at: example.created_at(),
    };
    publish(state, EventEnvelope::from_event(&event)).await;
}

async fn publish_updated(state: &ExampleAppState, example: &Example) {
    let event = ExampleUpdated {
        event_id: EventId::new(),
        example_id: example.id(),
        name: example.name().to_string(),
        email: example.email().to_string(),
        age: example.age(),
        updated_at: example.updated_at(),
    };
    publish(state, EventEnvelope::from_event(&event)).await;
}

async fn publish_deleted(state: &ExampleAppState, example: &Example) {
    let event = ExampleDeleted {
        event_id: EventId::new(),
        example_id: example.id(),
        name: example.name().to_string(),
        email: example.email().to_string(),
        deleted_at: crate::domain::foundation::Timestamp::now(),
    };
    publish(state, EventEnvelope::from_event(&event)).await;
}

/// Hands an envelope to the channel, logging instead of failing.
async fn publish(state: &ExampleAppState, envelope: EventEnvelope) {
    let envelope =
        envelope.with_metadata(EventMetadata::new(EVENT_SOURCE, EVENT_CONTRACT_VERSION));
    let event_type = envelope.event_type.clone();

    if let Err(error) = state.publisher.publish(envelope).await {
        tracing::warn!(%error, event_type = %event_type, "Failed to publish event");
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

fn parse_example_id(raw: &str) -> Result<ExampleId, Response> {
    raw.parse::<ExampleId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::new(
                ErrorCode::ValidationFailed,
                format!("Invalid example ID: {}", raw),
            )),
        )
            .into_response()
    })
}

fn handle_example_error(error: ExampleError) -> Response {
    let status = match &error {
        ExampleError::Validation(_) => StatusCode::BAD_REQUEST,
        ExampleError::BusinessRule(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ExampleError::NotFound(_) => StatusCode::NOT_FOUND,
        ExampleError::AlreadyExists(_) => StatusCode::CONFLICT,
        ExampleError::Rejected { .. } => StatusCode::UNPROCESSABLE_ENTITY,
        ExampleError::External { .. } => StatusCode::BAD_GATEWAY,
        ExampleError::Infrastructure(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };

    (status, Json(ErrorResponse::from_error(&error))).into_response()
}
