//! Example domain module.
//!
//! Handles the example aggregate: a validated name/email/age record with
//! repository-enforced email uniqueness.
//!
//! # Events
//!
//! - `ExampleCreated` - Published when a new example is created
//! - `ExampleUpdated` - Published when an example's fields change
//! - `ExampleDeleted` - Published when an example is removed

mod entity;
mod errors;
mod events;

pub use entity::{Example, MAX_AGE, MAX_NAME_LENGTH, MIN_AGE};
pub use errors::ExampleError;
pub use events::{ExampleCreated, ExampleDeleted, ExampleUpdated};
