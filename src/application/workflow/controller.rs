//! WorkflowController - sequences user actions against the collaborators.
//!
//! Every network-bound operation follows the same shape:
//!
//! 1. Acquire the busy gate (or fail with `WorkflowError::Busy`)
//! 2. Await the collaborator call
//! 3. On success, write the result into the view state and maybe switch view
//! 4. On failure, leave the state as it was and record the failure
//! 5. Release the gate, on every path
//!
//! Mutations (create, vote) are followed by an authoritative reload of the
//! proposal list. Tallies are never incremented locally.

use std::sync::{Arc, Mutex};

use crate::domain::foundation::{DomainError, OperationId, ProposalId, VoterIdentity};
use crate::domain::governance::{
    ActiveView, AnalysisResult, DraftUpdate, GovernanceState, Proposal, ProposalDraft, VotingStats,
};
use crate::ports::{GovernanceAdvisor, GovernanceLedger, LedgerError};

use super::commands::{CastVoteCommand, CastVoteResult, CreateProposalResult};
use super::errors::WorkflowError;
use super::gate::{lock, BusyGuard};

/// Failure detail key, `"true"` when the failed request may be repeated.
pub const RETRYABLE_DETAIL: &str = "retryable";

/// Single-writer coordinator owning the governance view state.
pub struct WorkflowController {
    ledger: Arc<dyn GovernanceLedger>,
    advisor: Arc<dyn GovernanceAdvisor>,
    voter: VoterIdentity,
    state: Mutex<GovernanceState>,
}

impl WorkflowController {
    pub fn new(
        ledger: Arc<dyn GovernanceLedger>,
        advisor: Arc<dyn GovernanceAdvisor>,
        voter: VoterIdentity,
    ) -> Self {
        Self {
            ledger,
            advisor,
            voter,
            state: Mutex::new(GovernanceState::new()),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Runs `f` against the current state.
    pub fn read<R>(&self, f: impl FnOnce(&GovernanceState) -> R) -> R {
        f(&lock(&self.state))
    }

    /// A copy of the whole state.
    pub fn snapshot(&self) -> GovernanceState {
        self.read(GovernanceState::clone)
    }

    pub fn proposals(&self) -> Vec<Proposal> {
        self.read(|s| s.proposals().to_vec())
    }

    pub fn stats(&self) -> VotingStats {
        self.read(GovernanceState::stats)
    }

    pub fn draft(&self) -> ProposalDraft {
        self.read(|s| s.draft().clone())
    }

    pub fn is_busy(&self) -> bool {
        self.read(GovernanceState::is_busy)
    }

    pub fn active_view(&self) -> ActiveView {
        self.read(GovernanceState::active_view)
    }

    pub fn analysis(&self) -> Option<AnalysisResult> {
        self.read(|s| s.analysis().cloned())
    }

    pub fn recommendations(&self) -> Option<String> {
        self.read(|s| s.recommendations().map(str::to_owned))
    }

    pub fn last_failure(&self) -> Option<DomainError> {
        self.read(|s| s.last_failure().cloned())
    }

    /// Identity used for every vote cast through this controller.
    pub fn voter(&self) -> &VoterIdentity {
        &self.voter
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Local actions (no collaborator call, not gated)
    // ─────────────────────────────────────────────────────────────────────────

    /// Merges edited fields into the draft.
    pub fn update_draft(&self, update: DraftUpdate) {
        self.write(|s| s.update_draft(update));
    }

    /// Navigates to another view.
    pub fn show_view(&self, view: ActiveView) {
        self.write(|s| s.show(view));
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Gated operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Startup load: proposals and statistics as one gated operation.
    ///
    /// Both calls are issued together and each result is applied on its own,
    /// so a failing stats call does not hide freshly loaded proposals.
    ///
    /// # Errors
    ///
    /// The first failure, after whatever succeeded has been applied.
    pub async fn start(&self) -> Result<(), WorkflowError> {
        let op_id = OperationId::new();
        let _gate = self.enter("start", op_id)?;

        let (proposals, stats) = tokio::join!(self.ledger.fetch_proposals(), self.ledger.fetch_stats());

        let mut first_error: Option<WorkflowError> = None;
        match proposals {
            Ok(proposals) => {
                tracing::debug!(%op_id, count = proposals.len(), "Loaded proposals");
                self.write(|s| s.replace_proposals(proposals));
            }
            Err(e) => {
                let err = self.fail("start", op_id, e.into());
                first_error.get_or_insert(err);
            }
        }
        match stats {
            Ok(stats) => self.write(|s| s.replace_stats(stats)),
            Err(e) => {
                let err = self.fail("start", op_id, e.into());
                first_error.get_or_insert(err);
            }
        }

        match first_error {
            Some(err) => Err(err),
            None => {
                tracing::info!(%op_id, "Startup load complete");
                Ok(())
            }
        }
    }

    /// Reloads the proposal list.
    pub async fn load_proposals(&self) -> Result<(), WorkflowError> {
        let op_id = OperationId::new();
        let _gate = self.enter("load_proposals", op_id)?;

        match self.refresh_proposals(op_id).await {
            Ok(()) => Ok(()),
            Err(e) => Err(self.fail("load_proposals", op_id, e.into())),
        }
    }

    /// Reloads the voting statistics.
    pub async fn load_stats(&self) -> Result<VotingStats, WorkflowError> {
        let op_id = OperationId::new();
        let _gate = self.enter("load_stats", op_id)?;

        match self.ledger.fetch_stats().await {
            Ok(stats) => {
                self.write(|s| s.replace_stats(stats));
                Ok(stats)
            }
            Err(e) => Err(self.fail("load_stats", op_id, e.into())),
        }
    }

    /// Submits the current draft as a new proposal.
    ///
    /// A draft with a blank field is refused before the gate is touched and
    /// no collaborator is called. On success the draft is cleared, the list
    /// reloaded and the proposals view shown.
    pub async fn create_proposal(&self) -> Result<CreateProposalResult, WorkflowError> {
        let new_proposal = self.read(|s| s.draft().validate())?;

        let op_id = OperationId::new();
        let _gate = self.enter("create_proposal", op_id)?;

        let proposal_id = match self.ledger.submit_proposal(&new_proposal).await {
            Ok(id) => id,
            Err(e) => return Err(self.fail("create_proposal", op_id, e.into())),
        };
        tracing::info!(%op_id, %proposal_id, "Proposal created");

        self.write(GovernanceState::clear_draft);
        let refreshed = self.refresh_after_mutation("create_proposal", op_id).await;
        self.write(|s| s.show(ActiveView::Proposals));

        Ok(CreateProposalResult {
            proposal_id,
            refreshed,
        })
    }

    /// Casts a vote as the configured voter, then reloads the tallies.
    pub async fn cast_vote(&self, command: CastVoteCommand) -> Result<CastVoteResult, WorkflowError> {
        let op_id = OperationId::new();
        let _gate = self.enter("cast_vote", op_id)?;

        if let Err(e) = self
            .ledger
            .submit_vote(command.proposal_id, &self.voter, command.in_favor)
            .await
        {
            return Err(self.fail("cast_vote", op_id, e.into()));
        }
        tracing::info!(
            %op_id,
            proposal_id = %command.proposal_id,
            in_favor = command.in_favor,
            "Vote accepted"
        );

        let refreshed = self.refresh_after_mutation("cast_vote", op_id).await;
        Ok(CastVoteResult { refreshed })
    }

    /// Requests an AI analysis of one proposal and shows it.
    pub async fn analyze_proposal(
        &self,
        proposal_id: ProposalId,
    ) -> Result<AnalysisResult, WorkflowError> {
        let op_id = OperationId::new();
        let _gate = self.enter("analyze_proposal", op_id)?;

        match self.advisor.request_analysis(proposal_id).await {
            Ok(text) => {
                let result = AnalysisResult { proposal_id, text };
                self.write(|s| {
                    s.set_analysis(result.proposal_id, result.text.clone());
                    s.show(ActiveView::Analysis);
                });
                Ok(result)
            }
            Err(e) => Err(self.fail("analyze_proposal", op_id, e.into())),
        }
    }

    /// Requests governance-wide recommendations and shows them.
    pub async fn request_recommendations(&self) -> Result<String, WorkflowError> {
        let op_id = OperationId::new();
        let _gate = self.enter("request_recommendations", op_id)?;

        match self.advisor.request_recommendations().await {
            Ok(text) => {
                self.write(|s| {
                    s.set_recommendations(text.clone());
                    s.show(ActiveView::Recommendations);
                });
                Ok(text)
            }
            Err(e) => Err(self.fail("request_recommendations", op_id, e.into())),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internals
    // ─────────────────────────────────────────────────────────────────────────

    fn write(&self, f: impl FnOnce(&mut GovernanceState)) {
        f(&mut lock(&self.state));
    }

    fn enter(&self, operation: &'static str, op_id: OperationId) -> Result<BusyGuard<'_>, WorkflowError> {
        match BusyGuard::acquire(&self.state) {
            Some(guard) => {
                tracing::debug!(%op_id, operation, "Workflow operation started");
                Ok(guard)
            }
            None => {
                tracing::debug!(%op_id, operation, "Rejected: another operation is in progress");
                Err(WorkflowError::Busy)
            }
        }
    }

    /// Logs and records a collaborator failure, handing the error back.
    fn fail(&self, operation: &'static str, op_id: OperationId, err: WorkflowError) -> WorkflowError {
        tracing::warn!(%op_id, operation, error = %err, "Workflow operation failed");
        let failure = DomainError::from(err.clone())
            .with_detail("operation", operation)
            .with_detail(RETRYABLE_DETAIL, err.is_retryable().to_string());
        self.write(|s| s.record_failure(failure));
        err
    }

    /// Caller must hold the gate.
    async fn refresh_proposals(&self, op_id: OperationId) -> Result<(), LedgerError> {
        let proposals = self.ledger.fetch_proposals().await?;
        tracing::debug!(%op_id, count = proposals.len(), "Loaded proposals");
        self.write(|s| s.replace_proposals(proposals));
        Ok(())
    }

    /// Reload after a successful mutation. A failed reload does not undo the
    /// mutation; it is recorded and reported as `false`.
    async fn refresh_after_mutation(&self, operation: &'static str, op_id: OperationId) -> bool {
        match self.refresh_proposals(op_id).await {
            Ok(()) => true,
            Err(e) => {
                self.fail(operation, op_id, e.into());
                false
            }
        }
    }
}
