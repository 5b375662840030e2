//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ExampleRepository` - Persistence for the example aggregate
//! - `PartnerApi` - External validation/enrichment/notification service
//! - `EventPublisher` - Channel for domain event envelopes

mod event_publisher;
mod example_repository;
mod partner_api;

pub use event_publisher::{EventPublisher, PublishError};
pub use example_repository::{ExampleRepository, RepositoryError};
pub use partner_api::{EnrichmentData, ExternalData, PartnerApi, PartnerError};
