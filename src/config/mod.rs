//! Application configuration module
//!
//! Type-safe configuration loading from environment variables using the
//! `config` and `dotenvy` crates. Configuration is loaded with the
//! `DAO_GOVERNANCE` prefix and nested values use double underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use dao_governance::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Voting as {}", config.identity.voter);
//! ```

mod advisor;
mod error;
mod identity;
mod ledger;
mod logging;

pub use advisor::{AdvisorConfig, AdvisorProvider};
pub use error::{ConfigError, ValidationError};
pub use identity::IdentityConfig;
pub use ledger::{LedgerBackend, LedgerConfig};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Every section has defaults, so an empty environment yields a runnable
/// demo setup (in-memory ledger, canned advisor).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger backend selection and connection settings
    #[serde(default)]
    pub ledger: LedgerConfig,

    /// AI advisor selection and provider settings
    #[serde(default)]
    pub advisor: AdvisorConfig,

    /// Identity used when casting votes
    #[serde(default)]
    pub identity: IdentityConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `DAO_GOVERNANCE` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `DAO_GOVERNANCE__LEDGER__BACKEND=http` -> `ledger.backend = http`
    /// - `DAO_GOVERNANCE__IDENTITY__VOTER=carol.icp` -> `identity.voter = carol.icp`
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
                    .prefix("DAO_GOVERNANCE")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` for the first section that is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.ledger.validate()?;
        self.advisor.validate()?;
        self.identity.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}
