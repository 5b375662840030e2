//! HTTP adapter for example endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreateExampleRequest, EnrichedExampleResponse, ErrorResponse, ExampleResponse,
    ListExamplesParams, ListExamplesResponse, UpdateExampleRequest,
};
pub use handlers::ExampleAppState;
pub use routes::example_routes;
