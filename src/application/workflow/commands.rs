//! Commands and results of the workflow operations.

use crate::domain::foundation::ProposalId;

/// Cast a yes/no vote as the configured voter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVoteCommand {
    pub proposal_id: ProposalId,
    pub in_favor: bool,
}

impl CastVoteCommand {
    pub fn yes(proposal_id: ProposalId) -> Self {
        Self {
            proposal_id,
            in_favor: true,
        }
    }

    pub fn no(proposal_id: ProposalId) -> Self {
        Self {
            proposal_id,
            in_favor: false,
        }
    }
}

/// Outcome of a vote the ledger accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CastVoteResult {
    /// False when the follow-up reload failed and the displayed tallies are stale.
    pub refreshed: bool,
}

/// Outcome of a proposal the ledger accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CreateProposalResult {
    pub proposal_id: ProposalId,
    /// False when the follow-up reload failed and the new proposal is not yet listed.
    pub refreshed: bool,
}
