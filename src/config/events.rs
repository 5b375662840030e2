//! Event channel configuration

use serde::Deserialize;

use super::error::ValidationError;

/// Which event publisher adapter to wire at startup.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum EventBackend {
    /// Process-local channel, useful for development and tests.
    #[default]
    Memory,
    /// Redis pub/sub.
    Redis,
}

/// Event channel configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EventsConfig {
    /// Publisher backend to use
    #[serde(default)]
    pub backend: EventBackend,

    /// Redis connection URL (required for the redis backend)
    #[serde(default)]
    pub url: String,

    /// Prefix prepended to every channel name ("<prefix>.<event_type>")
    #[serde(default = "default_channel_prefix")]
    pub channel_prefix: String,
}

impl EventsConfig {
    /// Validate event channel configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.backend == EventBackend::Redis {
            if self.url.is_empty() {
                return Err(ValidationError::MissingRequired("EVENTS_URL"));
            }
            if !self.url.starts_with("redis://") && !self.url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        Ok(())
    }
}

impl Default for EventsConfig {
    fn default() -> Self {
        Self {
            backend: EventBackend::Memory,
            url: String::new(),
            channel_prefix: default_channel_prefix(),
        }
    }
}

fn default_channel_prefix() -> String {
    "events".to_string()
}
