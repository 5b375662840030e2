//! Example domain events.
//!
//! Events published when example lifecycle changes occur:
//! - `ExampleCreated` - New example persisted
//! - `ExampleUpdated` - Example fields changed
//! - `ExampleDeleted` - Example permanently removed
//!
//! Payloads snapshot the entity at the moment of the change so consumers
//! never need to read this service's storage.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::foundation::{domain_event, EventId, ExampleId, Timestamp};

// ════════════════════════════════════════════════════════════════════════════
// ExampleCreated
// ════════════════════════════════════════════════════════════════════════════

/// Published when a new example is created.
///
/// Carries the full entity snapshot plus any enrichment that was attached
/// to the create response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleCreated {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the created example.
    pub example_id: ExampleId,

    /// Name at creation time.
    pub name: String,

    /// Email at creation time.
    pub email: String,

    /// Age at creation time.
    pub age: i32,

    /// Enrichment attached to the create response, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<JsonValue>,

    /// When the example was created.
    pub created_at: Timestamp,
}

domain_event!(
    ExampleCreated,
    event_type = "example.created",
    aggregate_id = example_id,
    occurred_at = created_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ExampleUpdated
// ════════════════════════════════════════════════════════════════════════════

/// Published when an example's fields are changed.
///
/// Carries the post-update snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleUpdated {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the updated example.
    pub example_id: ExampleId,

    /// Name after the update.
    pub name: String,

    /// Email after the update.
    pub email: String,

    /// Age after the update.
    pub age: i32,

    /// When the update was applied.
    pub updated_at: Timestamp,
}

domain_event!(
    ExampleUpdated,
    event_type = "example.updated",
    aggregate_id = example_id,
    occurred_at = updated_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// ExampleDeleted
// ════════════════════════════════════════════════════════════════════════════

/// Published when an example is permanently deleted.
///
/// Carries identifying fields only; the full record no longer exists.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExampleDeleted {
    /// Unique identifier for this event.
    pub event_id: EventId,

    /// ID of the deleted example.
    pub example_id: ExampleId,

    /// Name the record had when deleted.
    pub name: String,

    /// Email the record had when deleted.
    pub email: String,

    /// When the deletion occurred.
    pub deleted_at: Timestamp,
}

domain_event!(
    ExampleDeleted,
    event_type = "example.deleted",
    aggregate_id = example_id,
    occurred_at = deleted_at,
    event_id = event_id
);

// ════════════════════════════════════════════════════════════════════════════
// Unit Tests
// ════════════════════════════════════════════════════════════════════════════
