//! Application layer - Service and use case orchestration.
//!
//! Two layers with a strict dependency direction: [`ExampleService`] owns
//! validation, business rules, and repository access; [`ExampleUseCase`]
//! wraps it with partner API orchestration (enrichment, external
//! validation, background notification). Transport adapters talk to the
//! use case only.

mod service;
mod usecase;

pub use service::{ExamplePage, ExampleService};
pub use usecase::{
    CreateExampleRequest, EnrichedExample, EnrichedExamplePage, ExampleUseCase,
    ListExamplesRequest, UpdateExampleRequest,
};
