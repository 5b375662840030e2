//! Axum router configuration for example endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    create_example, delete_example, get_example, get_example_by_email, list_examples,
    update_example, validate_and_create_example, ExampleAppState,
};

/// Create the example API router.
///
/// # Routes
///
/// - `POST /` - Create a new example
/// - `POST /validated` - Create after partner-side validation, with enrichment
/// - `GET /` - List examples with pagination
/// - `GET /:id` - Get an example by id, enriched with partner data
/// - `GET /email/:email` - Get an example by email
/// - `PUT /:id` - Update an example
/// - `DELETE /:id` - Delete an example
///
/// Intended to be mounted at `/api/examples` and finished with
/// `.with_state(ExampleAppState)` by the caller.
pub fn example_routes() -> Router<ExampleAppState> {
    Router::new()
        .route("/", post(create_example).get(list_examples))
        .route("/validated", post(validate_and_create_example))
        .route(
            "/:id",
            get(get_example).put(update_example).delete(delete_example),
        )
        .route("/email/:email", get(get_example_by_email))
}
