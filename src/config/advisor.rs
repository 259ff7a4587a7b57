//! AI advisor configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Which advisor implementation to wire up
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum AdvisorProvider {
    /// Fixed demo text
    #[default]
    Canned,
    /// Anthropic Messages API
    Anthropic,
}

/// AI advisor configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AdvisorConfig {
    /// Provider selection
    #[serde(default)]
    pub provider: AdvisorProvider,

    /// Anthropic API key
    pub anthropic_api_key: Option<Secret<String>>,

    /// Model name
    #[serde(default = "default_model")]
    pub model: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Completion length limit
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Simulated latency of the canned advisor, in milliseconds
    #[serde(default)]
    pub canned_delay_ms: u64,
}

impl AdvisorConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Get canned advisor latency as Duration
    pub fn canned_delay(&self) -> Duration {
        Duration::from_millis(self.canned_delay_ms)
    }

    /// Validate advisor configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.timeout_secs == 0 || self.timeout_secs > 600 {
            return Err(ValidationError::InvalidTimeout);
        }
        if self.max_tokens == 0 || self.max_tokens > 8192 {
            return Err(ValidationError::InvalidMaxTokens);
        }

        if self.provider == AdvisorProvider::Anthropic {
            let key = self
                .anthropic_api_key
                .as_ref()
                .map(|k| k.expose_secret().as_str())
                .filter(|k| !k.is_empty())
                .ok_or(ValidationError::MissingRequired("ADVISOR__ANTHROPIC_API_KEY"))?;
            if !key.starts_with("sk-ant-") {
                return Err(ValidationError::InvalidAnthropicKey);
            }
        }

        Ok(())
    }
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            provider: AdvisorProvider::default(),
            anthropic_api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            canned_delay_ms: 0,
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_base_url() -> String {
    "https://api.anthropic.com".to_string()
}

fn default_timeout() -> u64 {
    120
}

fn default_max_tokens() -> u32 {
    1024
}
