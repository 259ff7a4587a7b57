//! The client-side view state.
//!
//! Holds the last snapshot fetched from the collaborators plus the draft and
//! navigation state. Readers get shared access; every mutator is crate-private
//! and is only called from the workflow controller's completion handlers.

use serde::Serialize;

use super::{ActiveView, DraftUpdate, Proposal, ProposalDraft, VotingStats};
use crate::domain::foundation::{DomainError, ProposalId};

/// AI analysis text for one proposal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisResult {
    pub proposal_id: ProposalId,
    pub text: String,
}

/// Everything the presentation layer can read.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GovernanceState {
    proposals: Vec<Proposal>,
    stats: VotingStats,
    analysis: Option<AnalysisResult>,
    recommendations: Option<String>,
    draft: ProposalDraft,
    active_view: ActiveView,
    busy: bool,
    last_failure: Option<DomainError>,
}

impl GovernanceState {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Proposals in ledger order.
    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn stats(&self) -> VotingStats {
        self.stats
    }

    /// Latest analysis, including which proposal it is about.
    pub fn analysis(&self) -> Option<&AnalysisResult> {
        self.analysis.as_ref()
    }

    pub fn recommendations(&self) -> Option<&str> {
        self.recommendations.as_deref()
    }

    pub fn draft(&self) -> &ProposalDraft {
        &self.draft
    }

    pub fn active_view(&self) -> ActiveView {
        self.active_view
    }

    /// True while a workflow operation is outstanding.
    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// The failure reported by the most recent operation, if it failed.
    pub fn last_failure(&self) -> Option<&DomainError> {
        self.last_failure.as_ref()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutators (workflow controller only)
    // ─────────────────────────────────────────────────────────────────────────

    pub(crate) fn replace_proposals(&mut self, proposals: Vec<Proposal>) {
        self.proposals = proposals;
    }

    pub(crate) fn replace_stats(&mut self, stats: VotingStats) {
        self.stats = stats;
    }

    pub(crate) fn set_analysis(&mut self, proposal_id: ProposalId, text: String) {
        self.analysis = Some(AnalysisResult { proposal_id, text });
    }

    pub(crate) fn set_recommendations(&mut self, text: String) {
        self.recommendations = Some(text);
    }

    pub(crate) fn update_draft(&mut self, update: DraftUpdate) {
        self.draft.apply(update);
    }

    pub(crate) fn clear_draft(&mut self) {
        self.draft = ProposalDraft::default();
    }

    pub(crate) fn show(&mut self, view: ActiveView) {
        self.active_view = view;
    }

    pub(crate) fn set_busy(&mut self, busy: bool) {
        self.busy = busy;
    }

    /// Keeps the first failure of the running operation; the gate clears it
    /// when the next operation starts.
    pub(crate) fn record_failure(&mut self, failure: DomainError) {
        self.last_failure.get_or_insert(failure);
    }

    pub(crate) fn clear_failure(&mut self) {
        self.last_failure = None;
    }
}
