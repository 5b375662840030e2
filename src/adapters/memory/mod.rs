//! In-Memory Adapters.
//!
//! Map-backed implementations of the persistence ports, used in development,
//! in tests, and as the fallback when PostgreSQL is unreachable. Data lives
//! for the lifetime of the process.

mod example_repository;

pub use example_repository::InMemoryExampleRepository;
