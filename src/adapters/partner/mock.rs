//! Mock partner API for development and testing.
//!
//! Provides a configurable in-process implementation of the PartnerApi port,
//! allowing the service to run without a reachable partner service.
//!
//! # Features
//!
//! - Canned external data and enrichment payloads
//! - Deterministic refusal rules for validation
//! - Simulated delays for timeout testing
//! - Failure injection for resilience testing
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let partner = MockPartnerApi::new().with_delay(Duration::from_millis(100));
//!
//! let verdict = partner.validate("Jane Doe", "jane@example.com", 30).await?;
//! assert!(verdict);
//! ```

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::time::sleep;

use crate::config::PartnerConfig;
use crate::domain::foundation::{ExampleId, Timestamp};
use crate::ports::{EnrichmentData, ExternalData, PartnerApi, PartnerError};

/// Name refused by the mock validation rules.
const REFUSED_NAME: &str = "invalid";
/// Email refused by the mock validation rules.
const REFUSED_EMAIL: &str = "blocked@example.com";
/// Ages below this are refused by the mock validation rules.
const MIN_ACCEPTED_AGE: i32 = 13;

/// Mock partner API.
///
/// Behavior knobs are shared behind the clone, so tests can adjust latency
/// and failure injection after the mock has been handed to the use case.
#[derive(Debug, Clone)]
pub struct MockPartnerApi {
    /// Adjustable behavior knobs.
    behavior: Arc<Mutex<Behavior>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<RecordedCall>>>,
}

#[derive(Debug, Clone, Copy)]
struct Behavior {
    /// Simulated latency per call.
    delay: Duration,
    /// Fail every call after the delay has elapsed.
    should_fail: bool,
}

/// A single recorded partner call.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    FetchData {
        id: ExampleId,
    },
    Validate {
        name: String,
        email: String,
        age: i32,
    },
    Enrich {
        id: ExampleId,
    },
    NotifyCreated {
        id: ExampleId,
        email: String,
    },
}

impl Default for MockPartnerApi {
    fn default() -> Self {
        Self::new()
    }
}

impl MockPartnerApi {
    /// Creates a new mock with no latency and no failure injection.
    pub fn new() -> Self {
        Self {
            behavior: Arc::new(Mutex::new(Behavior {
                delay: Duration::ZERO,
                should_fail: false,
            })),
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Creates a mock with latency and failure injection taken from config.
    pub fn from_config(config: &PartnerConfig) -> Self {
        let mock = Self::new();
        mock.set_delay(config.mock_delay());
        mock.set_should_fail(config.mock_should_fail);
        mock
    }

    /// Sets simulated latency per call.
    pub fn with_delay(self, delay: Duration) -> Self {
        self.set_delay(delay);
        self
    }

    /// Makes every call fail.
    pub fn with_failure(self) -> Self {
        self.set_should_fail(true);
        self
    }

    /// Adjusts simulated latency at runtime.
    pub fn set_delay(&self, delay: Duration) {
        self.behavior.lock().unwrap().delay = delay;
    }

    /// Turns failure injection on or off at runtime.
    pub fn set_should_fail(&self, should_fail: bool) {
        self.behavior.lock().unwrap().should_fail = should_fail;
    }

    /// Returns the number of calls made to this mock.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded calls in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Clears the call history.
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    /// Applies the delay, then the failure injection.
    ///
    /// The delay runs even when the call is doomed to fail, so timeout
    /// handling can be exercised against a failing partner.
    async fn apply_behavior(&self) -> Result<(), PartnerError> {
        let behavior = *self.behavior.lock().unwrap();

        if !behavior.delay.is_zero() {
            sleep(behavior.delay).await;
        }

        if behavior.should_fail {
            return Err(PartnerError::unavailable("injected mock failure"));
        }

        Ok(())
    }
}

#[async_trait]
impl PartnerApi for MockPartnerApi {
    async fn fetch_data(&self, id: ExampleId) -> Result<ExternalData, PartnerError> {
        self.record(RecordedCall::FetchData { id });
        self.apply_behavior().await?;

        Ok(ExternalData {
            external_id: format!("ext_{}", id),
            metadata: HashMap::from([
                ("source".to_string(), "mock_api".to_string()),
                ("version".to_string(), "1.0".to_string()),
                ("processed".to_string(), Timestamp::now().to_rfc3339()),
            ]),
            score: 0.85,
            last_modified: Timestamp::now(),
        })
    }

    async fn validate(&self, name: &str, email: &str, age: i32) -> Result<bool, PartnerError> {
        self.record(RecordedCall::Validate {
            name: name.to_string(),
            email: email.to_string(),
            age,
        });
        self.apply_behavior().await?;

        let refused = name == REFUSED_NAME || email == REFUSED_EMAIL || age < MIN_ACCEPTED_AGE;
        Ok(!refused)
    }

    async fn enrich(&self, id: ExampleId) -> Result<EnrichmentData, PartnerError> {
        self.record(RecordedCall::Enrich { id });
        self.apply_behavior().await?;

        let mut enrichment = EnrichmentData::new();
        enrichment.insert(
            "external_id".to_string(),
            serde_json::json!(format!("ext_{}", id)),
        );
        enrichment.insert("risk_score".to_string(), serde_json::json!(0.1));
        enrichment.insert("verification".to_string(), serde_json::json!("pending"));
        enrichment.insert(
            "location_data".to_string(),
            serde_json::json!({ "country": "US", "region": "CA" }),
        );
        enrichment.insert(
            "preferences".to_string(),
            serde_json::json!({ "marketing_emails": true, "notifications": false }),
        );

        Ok(enrichment)
    }

    async fn notify_created(&self, id: ExampleId, email: &str) -> Result<(), PartnerError> {
        self.record(RecordedCall::NotifyCreated {
            id,
            email: email.to_string(),
        });
        self.apply_behavior().await?;

        Ok(())
    }
}
