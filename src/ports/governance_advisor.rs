//! Governance Advisor Port - Interface to the AI analysis service.
//!
//! The advisor produces free-form decision-support text: an analysis of a
//! single proposal, or recommendations across the whole ledger. The core
//! treats the text as opaque and only ever replaces what it displays.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId};

/// Port for AI-generated governance insight.
#[async_trait]
pub trait GovernanceAdvisor: Send + Sync {
    /// Benefits, risks and recommendations for one proposal.
    async fn request_analysis(&self, proposal_id: ProposalId) -> Result<String, AdvisorError>;

    /// Recommendations across all current proposals.
    async fn request_recommendations(&self) -> Result<String, AdvisorError>;
}

/// Errors from advisor calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdvisorError {
    /// Rate limited by the AI provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// The advisor does not know the proposal.
    #[error("unknown proposal {0}")]
    UnknownProposal(ProposalId),

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unavailable.
    #[error("advisor unavailable: {message}")]
    Unavailable { message: String },

    /// Network error during request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to parse provider response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl AdvisorError {
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Whether re-triggering the same action later might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited { .. } | Self::Unavailable { .. } | Self::Network(_) | Self::Timeout { .. }
        )
    }
}

impl From<AdvisorError> for DomainError {
    fn from(err: AdvisorError) -> Self {
        let code = match &err {
            AdvisorError::RateLimited { .. } => ErrorCode::RateLimited,
            AdvisorError::UnknownProposal(_) => ErrorCode::ProposalNotFound,
            AdvisorError::Network(_) => ErrorCode::NetworkError,
            AdvisorError::Parse(_) => ErrorCode::InvalidResponse,
            AdvisorError::AuthenticationFailed
            | AdvisorError::Unavailable { .. }
            | AdvisorError::Timeout { .. } => ErrorCode::AdvisorError,
        };
        DomainError::new(code, err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(AdvisorError::rate_limited(30).is_retryable());
        assert!(AdvisorError::Timeout { timeout_secs: 60 }.is_retryable());
        assert!(!AdvisorError::AuthenticationFailed.is_retryable());
        assert!(!AdvisorError::UnknownProposal(ProposalId::new(9)).is_retryable());
    }

    #[test]
    fn converts_to_domain_error_codes() {
        let err: DomainError = AdvisorError::rate_limited(30).into();
        assert_eq!(err.code, ErrorCode::RateLimited);
        assert_eq!(err.message, "rate limited: retry after 30s");

        let err: DomainError = AdvisorError::unavailable("down").into();
        assert_eq!(err.code, ErrorCode::AdvisorError);
    }
}
