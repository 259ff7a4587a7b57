//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid ledger URL format")]
    InvalidLedgerUrl,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Anthropic API key format")]
    InvalidAnthropicKey,

    #[error("Invalid max_tokens (must be 1-8192)")]
    InvalidMaxTokens,

    #[error("Voter identity cannot be empty")]
    EmptyVoterIdentity,

    #[error("Invalid log filter: {0}")]
    InvalidLogFilter(String),
}
