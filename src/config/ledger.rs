//! Ledger backend configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which ledger implementation to wire up
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LedgerBackend {
    /// In-process ledger seeded with demo proposals
    #[default]
    Memory,
    /// Remote ledger service over HTTP
    Http,
}

/// Ledger configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Backend selection
    #[serde(default)]
    pub backend: LedgerBackend,

    /// Base URL of the ledger service (required for `http`)
    pub base_url: Option<String>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl LedgerConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate ledger configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }

        if self.backend == LedgerBackend::Http {
            let url = self
                .base_url
                .as_deref()
                .filter(|u| !u.is_empty())
                .ok_or(ValidationError::MissingRequired("LEDGER__BASE_URL"))?;
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ValidationError::InvalidLedgerUrl);
            }
        }

        Ok(())
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            backend: LedgerBackend::default(),
            base_url: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}
