//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, error types, and the event
//! infrastructure that form the vocabulary of the Example domain.

mod errors;
mod events;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use events::{
    domain_event, DomainEvent, EventEnvelope, EventId, EventMetadata, SerializableDomainEvent,
};
pub use ids::ExampleId;
pub use timestamp::Timestamp;
