//! Partner API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Partner API configuration
///
/// Covers both the real HTTP client and the mock used in development and
/// tests. With `enable_mock` (the default) no other field is required.
#[derive(Debug, Clone, Deserialize)]
pub struct PartnerConfig {
    /// Base URL of the partner service
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// API key sent with every request (required for the real client)
    pub api_key: Option<String>,

    /// Per-call timeout for validation and enrichment, in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Timeout for the detached creation notification, in seconds
    #[serde(default = "default_notification_timeout")]
    pub notification_timeout_secs: u64,

    /// Use the in-process mock instead of the HTTP client
    #[serde(default = "default_enable_mock")]
    pub enable_mock: bool,

    /// Artificial latency added to every mock call, in milliseconds
    #[serde(default = "default_mock_delay_ms")]
    pub mock_delay_ms: u64,

    /// Make every mock call fail (for resilience testing)
    #[serde(default)]
    pub mock_should_fail: bool,
}

impl PartnerConfig {
    /// Get the validation/enrichment timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get the notification timeout as Duration
    pub fn notification_timeout(&self) -> Duration {
        Duration::from_secs(self.notification_timeout_secs)
    }

    /// Get the mock delay as Duration
    pub fn mock_delay(&self) -> Duration {
        Duration::from_millis(self.mock_delay_ms)
    }

    /// Validate partner configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.notification_timeout_secs == 0 {
            return Err(ValidationError::InvalidPartnerTimeout);
        }
        if !self.enable_mock {
            if self.base_url.is_empty() {
                return Err(ValidationError::MissingRequired("PARTNER_BASE_URL"));
            }
            if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
                return Err(ValidationError::InvalidPartnerUrl);
            }
        }
        Ok(())
    }
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
            notification_timeout_secs: default_notification_timeout(),
            enable_mock: default_enable_mock(),
            mock_delay_ms: default_mock_delay_ms(),
            mock_should_fail: false,
        }
    }
}

fn default_base_url() -> String {
    "https://api.example.com".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_notification_timeout() -> u64 {
    30
}

fn default_enable_mock() -> bool {
    true
}

fn default_mock_delay_ms() -> u64 {
    100
}
