//! Dashboard view - render-ready projection of the governance state.
//!
//! Derived values (relative times, approval share) are recomputed from a
//! supplied "now" on every call and never stored.

use serde::Serialize;

use super::workflow::RETRYABLE_DETAIL;
use crate::domain::foundation::{Percentage, ProposalId, Timestamp};
use crate::domain::governance::{
    format_time_ago, ActiveView, GovernanceState, Proposal, ProposalStatus, VotingStats,
};

/// One proposal card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProposalCard {
    pub id: ProposalId,
    pub title: String,
    pub description: String,
    pub proposer: String,
    pub votes_for: u64,
    pub votes_against: u64,
    /// Hidden when nobody has voted yet.
    pub approval: Option<Percentage>,
    pub status: ProposalStatus,
    pub created: String,
}

impl ProposalCard {
    fn from_proposal(proposal: &Proposal, now: &Timestamp) -> Self {
        Self {
            id: proposal.id(),
            title: proposal.title().to_string(),
            description: proposal.description().to_string(),
            proposer: proposal.proposer().to_string(),
            votes_for: proposal.votes_for(),
            votes_against: proposal.votes_against(),
            approval: proposal.approval(),
            status: proposal.status(),
            created: format_time_ago(now, proposal.created_at()),
        }
    }
}

/// Everything a front end needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub stats: VotingStats,
    pub active_view: ActiveView,
    pub busy: bool,
    pub proposals: Vec<ProposalCard>,
    pub analysis_subject: Option<ProposalId>,
    pub analysis: Option<String>,
    pub recommendations: Option<String>,
    pub last_failure: Option<String>,
    /// Whether the failed action is worth offering again.
    pub retry_available: bool,
}

impl DashboardView {
    /// Projects the state as seen at `now`.
    pub fn render(state: &GovernanceState, now: &Timestamp) -> Self {
        Self {
            stats: state.stats(),
            active_view: state.active_view(),
            busy: state.is_busy(),
            proposals: state
                .proposals()
                .iter()
                .map(|p| ProposalCard::from_proposal(p, now))
                .collect(),
            analysis_subject: state.analysis().map(|a| a.proposal_id),
            analysis: state.analysis().map(|a| a.text.clone()),
            recommendations: state.recommendations().map(str::to_owned),
            last_failure: state.last_failure().map(ToString::to_string),
            retry_available: state
                .last_failure()
                .and_then(|f| f.details.get(RETRYABLE_DETAIL))
                .is_some_and(|v| v == "true"),
        }
    }
}
