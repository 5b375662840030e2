//! Event infrastructure for domain event publishing.
//!
//! This module provides the types and traits behind the event boundary:
//! - `EventId` - Unique identifier for events (deduplication)
//! - `EventMetadata` - Provenance and correlation context
//! - `EventEnvelope` - Transport wrapper for domain events
//! - `DomainEvent` - Trait that all domain events implement
//! - `domain_event!` - Macro to simplify DomainEvent implementations
//!
//! Envelopes are write-once: constructed from a domain event, optionally
//! annotated with caller metadata, then handed to an `EventPublisher`. This
//! system never persists them.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;
use uuid::Uuid;

use super::Timestamp;

/// Trait that all domain events must implement.
///
/// Provides the contract for event identification and routing. Use the
/// `domain_event!` macro to implement this trait with minimal boilerplate.
///
/// For types that also implement `Serialize`, the `to_envelope()` method
/// is automatically available via the `SerializableDomainEvent` extension
/// trait.
pub trait DomainEvent: Send + Sync {
    /// Returns the event type string (e.g., "example.created").
    /// Used for routing and filtering.
    fn event_type(&self) -> &'static str;

    /// Returns the ID of the entity this event is about.
    fn aggregate_id(&self) -> String;

    /// Returns when the event occurred.
    fn occurred_at(&self) -> Timestamp;

    /// Returns the unique ID for this event instance.
    fn event_id(&self) -> EventId;
}

/// Extension trait that provides `to_envelope()` for serializable events.
///
/// Automatically implemented for any type that implements both `DomainEvent`
/// and `Serialize`.
pub trait SerializableDomainEvent: DomainEvent + Serialize {
    /// Converts this domain event into an `EventEnvelope` for transport.
    fn to_envelope(&self) -> EventEnvelope {
        EventEnvelope {
            event_id: self.event_id(),
            event_type: self.event_type().to_string(),
            aggregate_id: self.aggregate_id(),
            occurred_at: self.occurred_at(),
            payload: serde_json::to_value(self)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }
}

impl<T: DomainEvent + Serialize> SerializableDomainEvent for T {}

/// Macro to implement DomainEvent trait with minimal boilerplate.
///
/// # Example
///
/// ```ignore
/// #[derive(Debug, Clone, Serialize, Deserialize)]
/// pub struct ExampleCreated {
///     pub event_id: EventId,
///     pub example_id: ExampleId,
///     pub occurred_at: Timestamp,
/// }
///
/// domain_event!(
///     ExampleCreated,
///     event_type = "example.created",
///     aggregate_id = example_id,
///     occurred_at = occurred_at,
///     event_id = event_id
/// );
/// ```
#[macro_export]
macro_rules! domain_event {
    (
        $event_name:ident,
        event_type = $event_type:expr,
        aggregate_id = $agg_id_field:ident,
        occurred_at = $occurred_field:ident,
        event_id = $event_id_field:ident
    ) => {
        impl $crate::domain::foundation::DomainEvent for $event_name {
            fn event_type(&self) -> &'static str {
                $event_type
            }

            fn aggregate_id(&self) -> String {
                self.$agg_id_field.to_string()
            }

            fn occurred_at(&self) -> $crate::domain::foundation::Timestamp {
                self.$occurred_field
            }

            fn event_id(&self) -> $crate::domain::foundation::EventId {
                self.$event_id_field.clone()
            }
        }
    };
}

// Re-export the macro
pub use domain_event;

/// Unique identifier for events (used for deduplication).
///
/// String-backed so that consumers can carry IDs from other systems without
/// forcing a UUID format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    /// Creates a new random EventId using UUID v4.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Creates an EventId from an existing string.
    ///
    /// No validation is performed - any string is accepted.
    pub fn from_string(s: impl Into<String>) -> Self {
        Self(s.into())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Provenance and correlation metadata carried by every envelope.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Name of the system that emitted the event.
    #[serde(default)]
    pub source: String,

    /// Contract version of the emitting system.
    #[serde(default)]
    pub version: String,

    /// User who initiated the action that led to this event.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,

    /// Distributed tracing span/trace ID.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace_id: Option<String>,
}

impl EventMetadata {
    /// Creates metadata with the emitting system's identity.
    pub fn new(source: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            version: version.into(),
            user_id: None,
            trace_id: None,
        }
    }
}

/// Transport envelope for domain events.
///
/// Wraps event-specific data with what the channel needs for routing
/// (event_type), deduplication (event_id), correlation (aggregate_id,
/// metadata), and ordering (occurred_at).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Unique ID for this event instance.
    pub event_id: EventId,

    /// Event type for routing (e.g., "example.created").
    pub event_type: String,

    /// ID of the entity this event is about.
    pub aggregate_id: String,

    /// When the event occurred.
    pub occurred_at: Timestamp,

    /// Event-specific payload as JSON.
    pub payload: JsonValue,

    /// Provenance and correlation metadata.
    pub metadata: EventMetadata,
}

impl EventEnvelope {
    /// Creates a new EventEnvelope with required fields.
    pub fn new(
        event_type: impl Into<String>,
        aggregate_id: impl Into<String>,
        payload: JsonValue,
    ) -> Self {
        Self {
            event_id: EventId::new(),
            event_type: event_type.into(),
            aggregate_id: aggregate_id.into(),
            occurred_at: Timestamp::now(),
            payload,
            metadata: EventMetadata::default(),
        }
    }

    /// Creates an envelope from a domain event with automatic serialization.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let event = ExampleCreated { /* ... */ };
    /// let envelope = EventEnvelope::from_event(&event)
    ///     .with_metadata(EventMetadata::new("example-service", "1.0"));
    /// publisher.publish(envelope).await?;
    /// ```
    pub fn from_event<T>(event: &T) -> Self
    where
        T: DomainEvent + Serialize,
    {
        Self {
            event_id: event.event_id(),
            event_type: event.event_type().to_string(),
            aggregate_id: event.aggregate_id(),
            occurred_at: event.occurred_at(),
            payload: serde_json::to_value(event)
                .expect("Event serialization should never fail for well-formed events"),
            metadata: EventMetadata::default(),
        }
    }

    /// Replaces the metadata block wholesale.
    pub fn with_metadata(mut self, metadata: EventMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Add user ID for audit.
    pub fn with_user_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.user_id = Some(id.into());
        self
    }

    /// Add trace ID for distributed tracing.
    pub fn with_trace_id(mut self, id: impl Into<String>) -> Self {
        self.metadata.trace_id = Some(id.into());
        self
    }

    /// Deserialize payload to a specific event type.
    pub fn payload_as<T: for<'de> Deserialize<'de>>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_value(self.payload.clone())
    }
}
