//! EventPublisher port - Interface for publishing domain events.
//!
//! This port defines how the transport layer publishes events without
//! knowing about the underlying channel (in-memory, Redis, etc.).

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::EventEnvelope;

/// Errors returned when an event cannot be handed to the channel.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PublishError {
    /// The channel rejected the event or could not be reached.
    #[error("event transport failed: {0}")]
    Transport(String),

    /// The envelope could not be encoded for the wire.
    #[error("event payload could not be serialized: {0}")]
    Serialization(String),
}

/// Port for publishing domain events.
///
/// Implementations must ensure:
/// - Events are delivered at-least-once (consumers may receive duplicates)
/// - Errors are propagated to the caller, who decides whether a publish
///   failure is fatal
///
/// # Example
///
/// ```ignore
/// let envelope = EventEnvelope::from_event(&event)
///     .with_metadata(EventMetadata::new("example-service", "1.0"));
/// publisher.publish(envelope).await?;
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish a single event.
    ///
    /// The envelope carries:
    /// - Event ID for deduplication
    /// - Event type for routing
    /// - Aggregate ID for correlation
    /// - Metadata for provenance and tracing
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError>;
}
