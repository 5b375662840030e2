//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors, events)
//! - `example` - The example aggregate, its errors, and its lifecycle events

pub mod example;
pub mod foundation;
