//! HTTP DTOs for example endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::application::{EnrichedExample, EnrichedExamplePage};
use crate::domain::example::{Example, ExampleError};
use crate::domain::foundation::{ErrorCode, Timestamp};
use crate::ports::{EnrichmentData, ExternalData};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create an example.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateExampleRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Request to update an example.
///
/// All fields are required; the update replaces every mutable field.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateExampleRequest {
    pub name: String,
    pub email: String,
    pub age: i32,
}

/// Pagination query parameters for listing examples.
///
/// Absent values defer to the server-side defaults and clamps.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct ListExamplesParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Stored example fields, shared by all example responses.
#[derive(Debug, Clone, Serialize)]
pub struct ExampleResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub age: i32,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Example> for ExampleResponse {
    fn from(example: Example) -> Self {
        Self {
            id: example.id().to_string(),
            name: example.name().to_string(),
            email: example.email().to_string(),
            age: example.age(),
            created_at: example.created_at(),
            updated_at: example.updated_at(),
        }
    }
}

/// Example plus whatever partner data was available at read time.
///
/// `external_data` and `enrichment` are omitted from the JSON entirely when
/// the partner could not supply them.
#[derive(Debug, Clone, Serialize)]
pub struct EnrichedExampleResponse {
    #[serde(flatten)]
    pub example: ExampleResponse,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_data: Option<ExternalData>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<EnrichmentData>,
}

impl From<EnrichedExample> for EnrichedExampleResponse {
    fn from(enriched: EnrichedExample) -> Self {
        Self {
            example: enriched.example.into(),
            external_data: enriched.external_data,
            enrichment: enriched.enrichment,
        }
    }
}

/// Paged list of enriched examples.
#[derive(Debug, Clone, Serialize)]
pub struct ListExamplesResponse {
    pub examples: Vec<EnrichedExampleResponse>,
    pub total: u64,
    pub limit: i64,
    pub offset: i64,
}

impl From<EnrichedExamplePage> for ListExamplesResponse {
    fn from(page: EnrichedExamplePage) -> Self {
        Self {
            examples: page.examples.into_iter().map(Into::into).collect(),
            total: page.total,
            limit: page.limit,
            offset: page.offset,
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
            details: None,
        }
    }

    pub fn from_error(error: &ExampleError) -> Self {
        let mut response = Self::new(error.code(), error.message());
        if let ExampleError::Validation(err) = error {
            response.details = Some(serde_json::json!({ "field": err.field() }));
        }
        response
    }
}
