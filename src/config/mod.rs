//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `EXAMPLE_SERVICE_` prefix and nested values use double underscores as
//! separators.
//!
//! Every section has working defaults (memory storage, mock partner, memory
//! event channel), so a development instance starts with no environment at all.
//!
//! # Example
//!
//! ```no_run
//! use example_service::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {:?}", config.server.socket_addr());
//! ```

mod database;
mod error;
mod events;
mod limits;
mod partner;
mod server;

pub use database::{DatabaseConfig, StorageBackend};
pub use error::{ConfigError, ValidationError};
pub use events::{EventBackend, EventsConfig};
pub use limits::LimitsConfig;
pub use partner::PartnerConfig;
pub use server::{Environment, ServerConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the example service.
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration (backend selection, PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Partner API configuration (timeouts, mock toggles)
    #[serde(default)]
    pub partner: PartnerConfig,

    /// Event channel configuration (backend selection, Redis connection)
    #[serde(default)]
    pub events: EventsConfig,

    /// Business rule limits and pagination bounds
    #[serde(default)]
    pub limits: LimitsConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `EXAMPLE_SERVICE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `EXAMPLE_SERVICE__SERVER__PORT=8080` -> `server.port = 8080`
    /// - `EXAMPLE_SERVICE__DATABASE__BACKEND=postgres` -> `database.backend = Postgres`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("EXAMPLE_SERVICE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - URL formats for the selected backends
    /// - Pool size constraints
    /// - Timeout and limit bounds
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.database.validate()?;
        self.partner.validate()?;
        self.events.validate()?;
        self.limits.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}
