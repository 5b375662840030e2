//! Partner API port - Interface to the external collaborator service.
//!
//! The partner service validates prospective examples, supplies enrichment
//! data for responses, and receives creation notifications. Everything it
//! returns is ephemeral: fetched per request, attached to one response or
//! event payload, never persisted.

use crate::domain::foundation::{ExampleId, Timestamp};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Free-form enrichment attributes returned by the partner.
///
/// The shape is owned by the partner service, so it is carried as an open
/// JSON object rather than a typed struct.
pub type EnrichmentData = serde_json::Map<String, serde_json::Value>;

/// Errors returned by partner API calls.
///
/// Callers treat both variants identically: non-fatal on enrichment and
/// notification paths, fatal on the explicit validation path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PartnerError {
    /// The partner service could not be reached or answered with a failure.
    #[error("partner API unavailable: {0}")]
    Unavailable(String),

    /// The call exceeded its deadline.
    #[error("partner API timed out: {0}")]
    Timeout(String),
}

impl PartnerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        PartnerError::Unavailable(message.into())
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        PartnerError::Timeout(message.into())
    }
}

/// Structured per-example record held by the partner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExternalData {
    /// Partner-side identifier for the example.
    pub external_id: String,

    /// Provenance attributes (source system, contract version, etc.).
    pub metadata: HashMap<String, String>,

    /// Partner-computed confidence score.
    pub score: f64,

    /// When the partner last touched this record.
    pub last_modified: Timestamp,
}

/// Port for the external partner service.
///
/// All four calls may fail with `Unavailable` or `Timeout`; the caller
/// decides per call site whether that failure is fatal.
#[async_trait]
pub trait PartnerApi: Send + Sync {
    /// Fetch the partner's structured record for an example.
    async fn fetch_data(&self, id: ExampleId) -> Result<ExternalData, PartnerError>;

    /// Ask the partner whether this input should be accepted.
    ///
    /// `Ok(false)` is an explicit refusal, distinct from a call failure.
    async fn validate(&self, name: &str, email: &str, age: i32) -> Result<bool, PartnerError>;

    /// Fetch free-form enrichment attributes for an example.
    async fn enrich(&self, id: ExampleId) -> Result<EnrichmentData, PartnerError>;

    /// Tell the partner a new example exists.
    async fn notify_created(&self, id: ExampleId, email: &str) -> Result<(), PartnerError>;
}
