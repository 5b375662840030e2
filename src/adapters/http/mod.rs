//! HTTP adapters - REST API implementations.
//!
//! The example endpoints live in their own module; this module assembles the
//! application router, mounts the health probe and applies the shared
//! middleware stack (tracing, request ids, timeouts, compression, CORS).

pub mod example;

// Re-export key types for convenience
pub use example::example_routes;
pub use example::ExampleAppState;

use std::time::Duration;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServerConfig;

/// Build the complete application router.
///
/// Mounts the example API under `/api/examples`, the health probe at
/// `/health`, and wraps everything in the shared middleware stack. Request
/// ids are generated before tracing so the span can pick them up, and
/// propagated back on the response.
pub fn app_router(state: ExampleAppState, config: &ServerConfig) -> Router {
    let api = Router::new()
        .nest("/api/examples", example_routes())
        .with_state(state);

    Router::new()
        .route("/health", get(health))
        .merge(api)
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.request_timeout_secs,
                )))
                .layer(CompressionLayer::new())
                .layer(cors_layer(config)),
        )
}

/// Health probe response body.
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
}

/// GET /health - liveness probe
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        service: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// CORS layer derived from configuration.
///
/// With no configured origins the layer is fully permissive, which is what
/// local development wants. Configured origins switch it to an allow-list
/// with the standard method set.
fn cors_layer(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
            .allow_headers(Any)
    }
}
