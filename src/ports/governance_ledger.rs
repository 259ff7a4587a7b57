//! Governance Ledger Port - Interface to the proposal and vote backend.
//!
//! The ledger is the service of record for proposals, votes and aggregate
//! statistics. The client never stores authoritative state: it reads whole
//! snapshots through this port and writes only by submitting proposals and
//! votes.
//!
//! # Example
//!
//! ```ignore
//! let proposals = ledger.fetch_proposals().await?;
//! let id = ledger.submit_proposal(&new_proposal).await?;
//! ledger.submit_vote(id, &voter, true).await?;
//! ```

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ProposalId, VoterIdentity};
use crate::domain::governance::{NewProposal, Proposal, VotingStats};

/// Port for the proposal/vote backend.
#[async_trait]
pub trait GovernanceLedger: Send + Sync {
    /// All proposals, in the ledger's own order.
    async fn fetch_proposals(&self) -> Result<Vec<Proposal>, LedgerError>;

    /// Ledger-wide voting statistics.
    async fn fetch_stats(&self) -> Result<VotingStats, LedgerError>;

    /// Records a new proposal and returns the id the ledger assigned.
    async fn submit_proposal(&self, proposal: &NewProposal) -> Result<ProposalId, LedgerError>;

    /// Records a yes (`true`) or no (`false`) vote.
    ///
    /// Duplicate votes by the same voter are the ledger's concern.
    async fn submit_vote(
        &self,
        proposal_id: ProposalId,
        voter: &VoterIdentity,
        in_favor: bool,
    ) -> Result<(), LedgerError>;
}

/// Errors from ledger calls.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// The ledger could not be reached or returned a server error.
    #[error("ledger unavailable: {message}")]
    Unavailable { message: String },

    /// The ledger refused the request (closed proposal, bad input, ...).
    #[error("ledger rejected request: {reason}")]
    Rejected { reason: String },

    /// No proposal with that id.
    #[error("proposal {0} not found")]
    ProposalNotFound(ProposalId),

    /// Transport-level failure.
    #[error("network error: {0}")]
    Network(String),

    /// The ledger answered with something we could not interpret.
    #[error("invalid ledger response: {0}")]
    InvalidResponse(String),
}

impl LedgerError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        Self::Rejected {
            reason: reason.into(),
        }
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Whether re-triggering the same action later might succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Unavailable { .. } | Self::Network(_))
    }
}

impl From<LedgerError> for DomainError {
    fn from(err: LedgerError) -> Self {
        let code = match &err {
            LedgerError::Unavailable { .. } => ErrorCode::LedgerUnavailable,
            LedgerError::Rejected { .. } => ErrorCode::LedgerRejected,
            LedgerError::ProposalNotFound(_) => ErrorCode::ProposalNotFound,
            LedgerError::Network(_) => ErrorCode::NetworkError,
            LedgerError::InvalidResponse(_) => ErrorCode::InvalidResponse,
        };
        let domain = DomainError::new(code, err.to_string());
        match err {
            LedgerError::ProposalNotFound(id) => domain.with_detail("proposal_id", id.to_string()),
            _ => domain,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn retryable_errors() {
        assert!(LedgerError::unavailable("503").is_retryable());
        assert!(LedgerError::network("reset").is_retryable());
        assert!(!LedgerError::rejected("closed").is_retryable());
        assert!(!LedgerError::ProposalNotFound(ProposalId::new(3)).is_retryable());
    }

    #[test]
    fn not_found_converts_with_proposal_detail() {
        let err: DomainError = LedgerError::ProposalNotFound(ProposalId::new(3)).into();
        assert_eq!(err.code, ErrorCode::ProposalNotFound);
        assert_eq!(err.details.get("proposal_id"), Some(&"3".to_string()));
        assert_eq!(err.message, "proposal 3 not found");
    }

    #[test]
    fn ledger_trait_is_object_safe() {
        fn _accepts_dyn(_ledger: &dyn GovernanceLedger) {}
    }
}
