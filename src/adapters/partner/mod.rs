//! Partner API Adapters.
//!
//! Implementations of the PartnerApi port for the external collaborator
//! service.
//!
//! ## Available Adapters
//!
//! - `MockPartnerApi` - Configurable in-process mock for development and tests
//! - `HttpPartnerApi` - reqwest-backed client for the real partner service

mod http;
mod mock;

pub use http::{HttpPartnerApi, HttpPartnerConfig};
pub use mock::{MockPartnerApi, RecordedCall};
