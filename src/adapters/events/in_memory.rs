//! In-memory event publisher for development and testing.
//!
//! Captures published envelopes so tests can assert on them; nothing leaves
//! the process. Consumers of the real channel live in other services, so
//! there is no in-process delivery.
//!
//! # Security Note
//!
//! This adapter is for **development and testing only**. It uses `.expect()`
//! on lock operations which will panic if locks are poisoned. Production
//! deployments should use the Redis publisher.

use async_trait::async_trait;
use std::sync::RwLock;

use crate::domain::foundation::EventEnvelope;
use crate::ports::{EventPublisher, PublishError};

/// In-memory event publisher.
///
/// Features:
/// - Synchronous capture (deterministic for tests)
/// - Envelope inspection helpers for assertions
///
/// # Panics
///
/// Methods may panic if internal locks are poisoned. This is acceptable
/// for test code but this adapter should NOT be used in production.
///
/// # Example
///
/// ```ignore
/// let publisher = Arc::new(InMemoryEventPublisher::new());
///
/// publisher.publish(envelope).await?;
///
/// assert_eq!(publisher.event_count(), 1);
/// assert!(publisher.has_event("example.created"));
/// ```
pub struct InMemoryEventPublisher {
    published: RwLock<Vec<EventEnvelope>>,
}

impl InMemoryEventPublisher {
    /// Creates a new empty publisher.
    pub fn new() -> Self {
        Self {
            published: RwLock::new(Vec::new()),
        }
    }

    // === Test Helpers ===

    /// Returns all published events (for test assertions).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn published_events(&self) -> Vec<EventEnvelope> {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .clone()
    }

    /// Returns events of a specific type.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn events_of_type(&self, event_type: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.event_type == event_type)
            .collect()
    }

    /// Returns events for a specific aggregate.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn events_for_aggregate(&self, aggregate_id: &str) -> Vec<EventEnvelope> {
        self.published_events()
            .into_iter()
            .filter(|e| e.aggregate_id == aggregate_id)
            .collect()
    }

    /// Clears all published events (for test isolation).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn clear(&self) {
        self.published
            .write()
            .expect("InMemoryEventPublisher: published write lock poisoned")
            .clear();
    }

    /// Returns count of published events.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn event_count(&self) -> usize {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .len()
    }

    /// Checks if a specific event type was published.
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    pub fn has_event(&self, event_type: &str) -> bool {
        self.published
            .read()
            .expect("InMemoryEventPublisher: published lock poisoned")
            .iter()
            .any(|e| e.event_type == event_type)
    }
}

impl Default for InMemoryEventPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EventPublisher for InMemoryEventPublisher {
    async fn publish(&self, event: EventEnvelope) -> Result<(), PublishError> {
        self.published
            .write()
            .expect("InMemoryEventPublisher: published write lock poisoned")
            .push(event);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn test_envelope(event_type: &str, aggregate_id: &str) -> EventEnvelope {
        EventEnvelope::new(event_type, aggregate_id, json!({}))
    }

    #[tokio::test]
    async fn publish_stores_event() {
        let publisher = InMemoryEventPublisher::new();
        let event = test_envelope("example.created", "ex-1");

        publisher.publish(event).await.unwrap();

        assert_eq!(publisher.event_count(), 1);
        assert!(publisher.has_event("example.created"));
    }

    #[tokio::test]
    async fn events_of_type_filters_correctly() {
        let publisher = InMemoryEventPublisher::new();

        publisher.publish(test_envelope("example.created", "1")).await.unwrap();
        publisher.publish(test_envelope("example.deleted", "2")).await.unwrap();
        publisher.publish(test_envelope("example.created", "3")).await.unwrap();

        let created = publisher.events_of_type("example.created");
        assert_eq!(created.len(), 2);
    }

    #[tokio::test]
    async fn events_for_aggregate_filters_correctly() {
        let publisher = InMemoryEventPublisher::new();

        publisher.publish(test_envelope("example.created", "ex-1")).await.unwrap();
        publisher.publish(test_envelope("example.updated", "ex-2")).await.unwrap();
        publisher.publish(test_envelope("example.deleted", "ex-1")).await.unwrap();

        let for_one = publisher.events_for_aggregate("ex-1");
        assert_eq!(for_one.len(), 2);
    }

    #[tokio::test]
    async fn clear_removes_all_events() {
        let publisher = InMemoryEventPublisher::new();

        publisher.publish(test_envelope("example.created", "1")).await.unwrap();
        publisher.publish(test_envelope("example.created", "2")).await.unwrap();

        assert_eq!(publisher.event_count(), 2);

        publisher.clear();

        assert_eq!(publisher.event_count(), 0);
    }

    #[tokio::test]
    async fn published_envelopes_are_preserved_verbatim() {
        let publisher = InMemoryEventPublisher::new();
        let envelope = EventEnvelope::new("example.created", "ex-9", json!({"name": "Jane Doe"}));
        let event_id = envelope.event_id.clone();

        publisher.publish(envelope).await.unwrap();

        let stored = publisher.published_events();
        assert_eq!(stored[0].event_id, event_id);
        assert_eq!(stored[0].payload["name"], "Jane Doe");
    }
}
