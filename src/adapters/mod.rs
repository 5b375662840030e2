//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `events` - Event publisher implementations (in-memory, Redis)
//! - `http` - Axum REST API exposing the example endpoints
//! - `memory` - Map-backed repository for development and tests
//! - `partner` - Partner API clients (mock, HTTP)
//! - `postgres` - PostgreSQL-backed repository

pub mod events;
pub mod http;
pub mod memory;
pub mod partner;
pub mod postgres;

pub use events::{InMemoryEventPublisher, RedisEventPublisher};
pub use memory::InMemoryExampleRepository;
pub use partner::{HttpPartnerApi, MockPartnerApi};
pub use postgres::PostgresExampleRepository;
