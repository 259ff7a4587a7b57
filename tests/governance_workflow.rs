//! Integration tests for the governance workflow.
//!
//! These tests drive the public controller surface end to end:
//! 1. Startup loads proposals and statistics from the ledger
//! 2. Votes and new proposals go to the ledger and are followed by a reload
//! 3. AI requests replace analysis/recommendations and switch the view
//! 4. Failures leave the previous state in place and are surfaced
//!
//! Uses the in-memory ledger and canned advisor, plus a scripted ledger where
//! the exact replies matter.

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use dao_governance::adapters::{AdvisorCall, CannedAdvisor, InMemoryLedger, LedgerCall};
use dao_governance::application::{CastVoteCommand, DashboardView, WorkflowController, WorkflowError};
use dao_governance::domain::foundation::{
    ErrorCode, Percentage, ProposalId, Timestamp, ValidationError, VoterIdentity,
};
use dao_governance::domain::governance::{
    ActiveView, DraftUpdate, NewProposal, Proposal, ProposalStatus, VoteTally, VotingStats,
};
use dao_governance::ports::{AdvisorError, GovernanceLedger, LedgerError};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn voter() -> VoterIdentity {
    VoterIdentity::new("current-user.icp").unwrap()
}

fn demo_controller() -> (WorkflowController, Arc<InMemoryLedger>, Arc<CannedAdvisor>) {
    let ledger = Arc::new(InMemoryLedger::seeded(Timestamp::now()));
    let advisor = Arc::new(CannedAdvisor::new());
    let controller = WorkflowController::new(ledger.clone(), advisor.clone(), voter());
    (controller, ledger, advisor)
}

fn proposal(id: u64, votes_for: u64, votes_against: u64) -> Proposal {
    Proposal::new(
        ProposalId::new(id),
        format!("Proposal {id}"),
        "Description",
        "alice.icp",
        VoteTally::new(votes_for, votes_against),
        ProposalStatus::Active,
        Timestamp::now(),
    )
    .unwrap()
}

/// Ledger that answers `fetch_proposals` from a script and records calls.
struct ScriptedLedger {
    fetches: Mutex<VecDeque<Vec<Proposal>>>,
    calls: Mutex<Vec<LedgerCall>>,
}

impl ScriptedLedger {
    fn new(fetches: Vec<Vec<Proposal>>) -> Self {
        Self {
            fetches: Mutex::new(fetches.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<LedgerCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl GovernanceLedger for ScriptedLedger {
    async fn fetch_proposals(&self) -> Result<Vec<Proposal>, LedgerError> {
        self.calls.lock().unwrap().push(LedgerCall::FetchProposals);
        self.fetches
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| LedgerError::unavailable("script exhausted"))
    }

    async fn fetch_stats(&self) -> Result<VotingStats, LedgerError> {
        self.calls.lock().unwrap().push(LedgerCall::FetchStats);
        Ok(VotingStats::default())
    }

    async fn submit_proposal(&self, proposal: &NewProposal) -> Result<ProposalId, LedgerError> {
        self.calls
            .lock()
            .unwrap()
            .push(LedgerCall::SubmitProposal(proposal.clone()));
        Ok(ProposalId::new(99))
    }

    async fn submit_vote(
        &self,
        proposal_id: ProposalId,
        voter: &VoterIdentity,
        in_favor: bool,
    ) -> Result<(), LedgerError> {
        self.calls.lock().unwrap().push(LedgerCall::SubmitVote {
            proposal_id,
            voter: voter.clone(),
            in_favor,
        });
        Ok(())
    }
}

// =============================================================================
// Startup
// =============================================================================

#[tokio::test]
async fn startup_reflects_seeded_ledger() {
    let (controller, _ledger, _advisor) = demo_controller();
    assert!(!controller.is_busy());

    controller.start().await.unwrap();

    assert_eq!(controller.stats(), VotingStats::new(2, 2, 38));
    let tallies: Vec<(u64, u64)> = controller
        .proposals()
        .iter()
        .map(|p| (p.votes_for(), p.votes_against()))
        .collect();
    assert_eq!(tallies, vec![(15, 3), (8, 12)]);
    assert_eq!(controller.active_view(), ActiveView::Proposals);
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn startup_dashboard_shows_relative_times_and_approval() {
    let now = Timestamp::now();
    let ledger = Arc::new(InMemoryLedger::seeded(now));
    let controller = WorkflowController::new(ledger, Arc::new(CannedAdvisor::new()), voter());
    controller.start().await.unwrap();

    let view = DashboardView::render(&controller.snapshot(), &now);

    assert_eq!(view.proposals[0].created, "1 day ago");
    assert_eq!(view.proposals[1].created, "2 days ago");
    assert_eq!(view.proposals[0].approval, Some(Percentage::new(83)));
    assert_eq!(view.proposals[1].approval, Some(Percentage::new(40)));
    assert!(view.last_failure.is_none());
}

#[tokio::test]
async fn startup_partial_failure_applies_the_other_load() {
    let ledger = Arc::new(InMemoryLedger::seeded(Timestamp::now()));
    let controller =
        WorkflowController::new(ledger.clone(), Arc::new(CannedAdvisor::new()), voter());
    // One of the two concurrent fetches fails, the other must still apply.
    ledger.fail_next_fetch(LedgerError::unavailable("stats down"));

    let result = controller.start().await;

    assert!(matches!(result, Err(WorkflowError::Ledger(_))));
    assert!(!controller.is_busy());
    assert!(controller.last_failure().is_some());
    let loaded = controller.proposals().len() + usize::from(controller.stats() != VotingStats::default());
    assert_eq!(loaded, 1, "exactly one of the two startup loads should have applied");
}

// =============================================================================
// Voting
// =============================================================================

#[tokio::test]
async fn yes_vote_submits_then_reloads_exactly_once() {
    let first = vec![proposal(0, 15, 3), proposal(1, 8, 12)];
    let second = vec![proposal(0, 16, 3), proposal(1, 8, 12)];
    let ledger = Arc::new(ScriptedLedger::new(vec![first, second]));
    let controller =
        WorkflowController::new(ledger.clone(), Arc::new(CannedAdvisor::new()), voter());
    controller.load_proposals().await.unwrap();

    let result = controller
        .cast_vote(CastVoteCommand::yes(ProposalId::new(0)))
        .await
        .unwrap();

    assert!(result.refreshed);
    assert_eq!(
        ledger.calls(),
        vec![
            LedgerCall::FetchProposals,
            LedgerCall::SubmitVote {
                proposal_id: ProposalId::new(0),
                voter: voter(),
                in_favor: true,
            },
            LedgerCall::FetchProposals,
        ]
    );
    let updated = controller.proposals();
    assert_eq!((updated[0].votes_for(), updated[0].votes_against()), (16, 3));
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn displayed_tally_comes_from_reload_not_local_increment() {
    // The ledger counted other voters too; the client must show its numbers.
    let first = vec![proposal(0, 15, 3)];
    let second = vec![proposal(0, 21, 5)];
    let ledger = Arc::new(ScriptedLedger::new(vec![first, second]));
    let controller =
        WorkflowController::new(ledger.clone(), Arc::new(CannedAdvisor::new()), voter());
    controller.load_proposals().await.unwrap();

    controller
        .cast_vote(CastVoteCommand::yes(ProposalId::new(0)))
        .await
        .unwrap();

    let updated = controller.proposals();
    assert_eq!((updated[0].votes_for(), updated[0].votes_against()), (21, 5));
}

#[tokio::test]
async fn vote_on_closed_proposal_is_rejected_and_tallies_stay() {
    let (controller, ledger, _advisor) = demo_controller();
    controller.start().await.unwrap();
    ledger.close(ProposalId::new(1)).unwrap();
    ledger.clear_calls();
    let before = controller.proposals();

    let result = controller.cast_vote(CastVoteCommand::no(ProposalId::new(1))).await;

    assert!(matches!(result, Err(WorkflowError::Ledger(LedgerError::Rejected { .. }))));
    assert_eq!(controller.proposals(), before);
    assert_eq!(ledger.calls().len(), 1, "no reload after a rejected vote");
    assert_eq!(
        controller.last_failure().map(|f| f.code),
        Some(ErrorCode::LedgerRejected)
    );
    assert!(!DashboardView::render(&controller.snapshot(), &Timestamp::now()).retry_available);
    assert!(!controller.is_busy());
}

#[tokio::test]
async fn vote_on_unknown_proposal_surfaces_not_found() {
    let (controller, _ledger, _advisor) = demo_controller();
    controller.start().await.unwrap();

    let result = controller
        .cast_vote(CastVoteCommand::yes(ProposalId::new(42)))
        .await;

    assert_eq!(
        result,
        Err(WorkflowError::Ledger(LedgerError::ProposalNotFound(ProposalId::new(42))))
    );
}

// =============================================================================
// Proposal creation
// =============================================================================

#[tokio::test]
async fn create_with_incomplete_draft_issues_no_call() {
    let (controller, ledger, _advisor) = demo_controller();
    controller.start().await.unwrap();
    ledger.clear_calls();
    controller.show_view(ActiveView::CreateDraft);
    controller.update_draft(DraftUpdate::default().title("Fund audits").proposer("carol.icp"));

    let result = controller.create_proposal().await;

    assert_eq!(
        result,
        Err(WorkflowError::Precondition(ValidationError::EmptyField {
            field: "description".to_string()
        }))
    );
    assert!(ledger.calls().is_empty());
    assert!(!controller.is_busy());
    assert_eq!(controller.active_view(), ActiveView::CreateDraft);
    assert_eq!(controller.draft().title, "Fund audits");
}

#[tokio::test]
async fn create_submits_clears_draft_and_lists_new_proposal() {
    let (controller, ledger, _advisor) = demo_controller();
    controller.start().await.unwrap();
    ledger.clear_calls();
    controller.show_view(ActiveView::CreateDraft);
    controller.update_draft(
        DraftUpdate::default()
            .title("Fund security audits")
            .description("Allocate 10,000 ICP for third-party audits")
            .proposer("carol.icp"),
    );

    let result = controller.create_proposal().await.unwrap();

    assert_eq!(result.proposal_id, ProposalId::new(2));
    assert!(result.refreshed);
    assert!(controller.draft().is_empty());
    assert_eq!(controller.active_view(), ActiveView::Proposals);
    let proposals = controller.proposals();
    assert_eq!(proposals.len(), 3);
    assert_eq!(proposals[2].title(), "Fund security audits");
    assert_eq!(proposals[2].approval(), None);
    assert!(matches!(ledger.calls()[0], LedgerCall::SubmitProposal(_)));
    assert_eq!(ledger.calls()[1], LedgerCall::FetchProposals);
}

#[tokio::test]
async fn create_submits_draft_text_as_typed() {
    let (controller, ledger, _advisor) = demo_controller();
    controller.start().await.unwrap();
    ledger.clear_calls();
    controller.update_draft(
        DraftUpdate::default()
            .title(" ")
            .description("  Padded  ")
            .proposer("carol.icp"),
    );

    controller.create_proposal().await.unwrap();

    assert_eq!(
        ledger.calls()[0],
        LedgerCall::SubmitProposal(NewProposal {
            title: " ".to_string(),
            description: "  Padded  ".to_string(),
            proposer: "carol.icp".to_string(),
        })
    );
    assert_eq!(controller.proposals()[2].title(), " ");
}

#[tokio::test]
async fn failed_create_keeps_draft_for_retry() {
    let (controller, ledger, _advisor) = demo_controller();
    controller.start().await.unwrap();
    ledger.fail_next_write(LedgerError::unavailable("canister busy"));
    controller.update_draft(
        DraftUpdate::default()
            .title("T")
            .description("D")
            .proposer("P"),
    );

    let result = controller.create_proposal().await;

    assert!(matches!(result, Err(WorkflowError::Ledger(_))));
    assert_eq!(controller.draft().title, "T");
    assert_eq!(controller.proposals().len(), 2);
    assert!(!controller.is_busy());
}

// =============================================================================
// AI insights
// =============================================================================

#[tokio::test]
async fn failing_analysis_leaves_previous_analysis_and_view() {
    let (controller, _ledger, advisor) = demo_controller();
    controller.start().await.unwrap();
    controller.analyze_proposal(ProposalId::new(0)).await.unwrap();
    controller.show_view(ActiveView::Proposals);
    let before = controller.analysis();
    advisor.fail_next(AdvisorError::unavailable("model overloaded"));

    let result = controller.analyze_proposal(ProposalId::new(1)).await;

    assert!(matches!(result, Err(WorkflowError::Advisor(_))));
    assert_eq!(controller.analysis(), before);
    assert_eq!(controller.analysis().map(|a| a.proposal_id), Some(ProposalId::new(0)));
    assert_eq!(controller.active_view(), ActiveView::Proposals);
    assert_eq!(
        controller.last_failure().map(|f| f.code),
        Some(ErrorCode::AdvisorError)
    );
    assert!(!controller.is_busy());
    assert!(DashboardView::render(&controller.snapshot(), &Timestamp::now()).retry_available);
}

#[tokio::test]
async fn recommendations_replace_text_and_switch_view() {
    let (controller, _ledger, advisor) = demo_controller();
    controller.start().await.unwrap();

    let text = controller.request_recommendations().await.unwrap();

    assert!(text.starts_with("Current Governance Recommendations:"));
    assert_eq!(controller.recommendations(), Some(text));
    assert_eq!(controller.active_view(), ActiveView::Recommendations);
    assert_eq!(advisor.calls(), vec![AdvisorCall::Recommendations]);
}

#[tokio::test]
async fn next_operation_clears_last_failure() {
    let (controller, _ledger, advisor) = demo_controller();
    advisor.fail_next(AdvisorError::unavailable("offline"));
    let _ = controller.request_recommendations().await;
    assert!(controller.last_failure().is_some());

    controller.start().await.unwrap();

    assert!(controller.last_failure().is_none());
}
