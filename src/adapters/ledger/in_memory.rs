//! In-memory governance ledger.
//!
//! A working stand-in for the real backend: assigns ids, applies votes to
//! tallies, and computes statistics from what it stores. Every call is
//! recorded so tests can assert on the exact sequence the workflow issued.
//!
//! # Example
//!
//! ```ignore
//! let ledger = InMemoryLedger::seeded(Timestamp::now());
//! ledger.fail_next_fetch(LedgerError::unavailable("maintenance"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::foundation::{ProposalId, Timestamp, VoterIdentity};
use crate::domain::governance::{NewProposal, Proposal, ProposalStatus, VoteTally, VotingStats};
use crate::ports::{GovernanceLedger, LedgerError};

/// A call received by the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCall {
    FetchProposals,
    FetchStats,
    SubmitProposal(NewProposal),
    SubmitVote {
        proposal_id: ProposalId,
        voter: VoterIdentity,
        in_favor: bool,
    },
}

#[derive(Debug, Clone)]
struct StoredProposal {
    id: ProposalId,
    title: String,
    description: String,
    proposer: String,
    tally: VoteTally,
    status: ProposalStatus,
    created_at: Timestamp,
}

impl StoredProposal {
    fn to_proposal(&self) -> Result<Proposal, LedgerError> {
        Proposal::new(
            self.id,
            self.title.clone(),
            self.description.clone(),
            self.proposer.clone(),
            self.tally,
            self.status,
            self.created_at,
        )
        .map_err(|e| LedgerError::invalid_response(e.to_string()))
    }
}

#[derive(Debug, Default)]
struct LedgerInner {
    proposals: Vec<StoredProposal>,
    next_id: u64,
    calls: Vec<LedgerCall>,
    fail_fetches: VecDeque<LedgerError>,
    fail_writes: VecDeque<LedgerError>,
}

/// In-memory ledger, safe to share between tasks.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    inner: Mutex<LedgerInner>,
}

impl InMemoryLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a ledger holding the two demo proposals, dated relative to `now`.
    pub fn seeded(now: Timestamp) -> Self {
        let ledger = Self::new();
        ledger.insert(
            "Increase Treasury Allocation for Development",
            "Proposal to allocate 50,000 ICP tokens from treasury for dApp development grants",
            "alice.icp",
            VoteTally::new(15, 3),
            ProposalStatus::Active,
            now.minus_days(1),
        );
        ledger.insert(
            "Implement New Governance Token Distribution",
            "Change the token distribution mechanism to reward long-term holders",
            "bob.icp",
            VoteTally::new(8, 12),
            ProposalStatus::Active,
            now.minus_days(2),
        );
        ledger
    }

    /// Stores a proposal directly, bypassing the call log.
    pub fn insert(
        &self,
        title: impl Into<String>,
        description: impl Into<String>,
        proposer: impl Into<String>,
        tally: VoteTally,
        status: ProposalStatus,
        created_at: Timestamp,
    ) -> ProposalId {
        let mut inner = self.lock();
        let id = ProposalId::new(inner.next_id);
        inner.next_id += 1;
        inner.proposals.push(StoredProposal {
            id,
            title: title.into(),
            description: description.into(),
            proposer: proposer.into(),
            tally,
            status,
            created_at,
        });
        id
    }

    /// Closes a proposal so that further votes are rejected.
    pub fn close(&self, proposal_id: ProposalId) -> Result<(), LedgerError> {
        let mut inner = self.lock();
        let stored = inner
            .proposals
            .iter_mut()
            .find(|p| p.id == proposal_id)
            .ok_or(LedgerError::ProposalNotFound(proposal_id))?;
        stored.status = ProposalStatus::Closed;
        Ok(())
    }

    /// Makes the next read (`fetch_proposals` or `fetch_stats`) fail.
    pub fn fail_next_fetch(&self, err: LedgerError) {
        self.lock().fail_fetches.push_back(err);
    }

    /// Makes the next write (`submit_proposal` or `submit_vote`) fail.
    pub fn fail_next_write(&self, err: LedgerError) {
        self.lock().fail_writes.push_back(err);
    }

    /// All calls received so far, oldest first.
    pub fn calls(&self) -> Vec<LedgerCall> {
        self.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    fn lock(&self) -> MutexGuard<'_, LedgerInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl LedgerInner {
    fn injected_fetch_failure(&mut self) -> Result<(), LedgerError> {
        self.fail_fetches.pop_front().map_or(Ok(()), Err)
    }

    fn injected_write_failure(&mut self) -> Result<(), LedgerError> {
        self.fail_writes.pop_front().map_or(Ok(()), Err)
    }
}

#[async_trait]
impl GovernanceLedger for InMemoryLedger {
    async fn fetch_proposals(&self) -> Result<Vec<Proposal>, LedgerError> {
        let mut inner = self.lock();
        inner.calls.push(LedgerCall::FetchProposals);
        inner.injected_fetch_failure()?;
        inner.proposals.iter().map(StoredProposal::to_proposal).collect()
    }

    async fn fetch_stats(&self) -> Result<VotingStats, LedgerError> {
        let mut inner = self.lock();
        inner.calls.push(LedgerCall::FetchStats);
        inner.injected_fetch_failure()?;

        let total_proposals = inner.proposals.len() as u64;
        let active_proposals = inner.proposals.iter().filter(|p| p.status.is_active()).count() as u64;
        let total_votes = inner
            .proposals
            .iter()
            .fold(0u64, |acc, p| acc.saturating_add(p.tally.total()));

        Ok(VotingStats::new(total_proposals, active_proposals, total_votes))
    }

    async fn submit_proposal(&self, proposal: &NewProposal) -> Result<ProposalId, LedgerError> {
        {
            let mut inner = self.lock();
            inner.calls.push(LedgerCall::SubmitProposal(proposal.clone()));
            inner.injected_write_failure()?;
        }
        Ok(self.insert(
            proposal.title.clone(),
            proposal.description.clone(),
            proposal.proposer.clone(),
            VoteTally::default(),
            ProposalStatus::Active,
            Timestamp::now(),
        ))
    }

    async fn submit_vote(
        &self,
        proposal_id: ProposalId,
        voter: &VoterIdentity,
        in_favor: bool,
    ) -> Result<(), LedgerError> {
        let mut inner = self.lock();
        inner.calls.push(LedgerCall::SubmitVote {
            proposal_id,
            voter: voter.clone(),
            in_favor,
        });
        inner.injected_write_failure()?;

        let stored = inner
            .proposals
            .iter_mut()
            .find(|p| p.id == proposal_id)
            .ok_or(LedgerError::ProposalNotFound(proposal_id))?;
        if !stored.status.is_active() {
            return Err(LedgerError::rejected(format!("proposal {proposal_id} is closed")));
        }
        if in_favor {
            stored.tally.votes_for = stored.tally.votes_for.saturating_add(1);
        } else {
            stored.tally.votes_against = stored.tally.votes_against.saturating_add(1);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn voter() -> VoterIdentity {
        VoterIdentity::new("current-user.icp").unwrap()
    }

    #[tokio::test]
    async fn seeded_ledger_reports_demo_stats() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());

        let stats = ledger.fetch_stats().await.unwrap();

        assert_eq!(stats, VotingStats::new(2, 2, 38));
    }

    #[tokio::test]
    async fn seeded_ledger_keeps_insertion_order() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());

        let proposals = ledger.fetch_proposals().await.unwrap();

        assert_eq!(proposals.len(), 2);
        assert_eq!(proposals[0].id(), ProposalId::new(0));
        assert_eq!(proposals[0].proposer(), "alice.icp");
        assert_eq!(proposals[0].tally(), VoteTally::new(15, 3));
        assert_eq!(proposals[1].tally(), VoteTally::new(8, 12));
    }

    #[tokio::test]
    async fn submit_proposal_assigns_next_id() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());
        let new_proposal = NewProposal {
            title: "Fund audits".to_string(),
            description: "Two external audits".to_string(),
            proposer: "carol.icp".to_string(),
        };

        let id = ledger.submit_proposal(&new_proposal).await.unwrap();

        assert_eq!(id, ProposalId::new(2));
        let proposals = ledger.fetch_proposals().await.unwrap();
        assert_eq!(proposals[2].title(), "Fund audits");
        assert_eq!(proposals[2].tally(), VoteTally::default());
    }

    #[tokio::test]
    async fn votes_update_tallies() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());

        ledger.submit_vote(ProposalId::new(0), &voter(), true).await.unwrap();
        ledger.submit_vote(ProposalId::new(1), &voter(), false).await.unwrap();

        let proposals = ledger.fetch_proposals().await.unwrap();
        assert_eq!(proposals[0].tally(), VoteTally::new(16, 3));
        assert_eq!(proposals[1].tally(), VoteTally::new(8, 13));
    }

    #[tokio::test]
    async fn vote_on_unknown_proposal_is_not_found() {
        let ledger = InMemoryLedger::new();

        let result = ledger.submit_vote(ProposalId::new(5), &voter(), true).await;

        assert_eq!(result, Err(LedgerError::ProposalNotFound(ProposalId::new(5))));
    }

    #[tokio::test]
    async fn vote_on_closed_proposal_is_rejected() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());
        ledger.close(ProposalId::new(1)).unwrap();

        let result = ledger.submit_vote(ProposalId::new(1), &voter(), true).await;

        assert!(matches!(result, Err(LedgerError::Rejected { .. })));
        assert_eq!(ledger.fetch_stats().await.unwrap().active_proposals, 1);
    }

    #[tokio::test]
    async fn injected_failures_fire_once() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());
        ledger.fail_next_fetch(LedgerError::unavailable("maintenance"));

        assert!(ledger.fetch_proposals().await.is_err());
        assert!(ledger.fetch_proposals().await.is_ok());
    }

    #[tokio::test]
    async fn records_calls_in_order() {
        let ledger = InMemoryLedger::seeded(Timestamp::now());

        ledger.submit_vote(ProposalId::new(0), &voter(), true).await.unwrap();
        ledger.fetch_proposals().await.unwrap();

        assert_eq!(
            ledger.calls(),
            vec![
                LedgerCall::SubmitVote {
                    proposal_id: ProposalId::new(0),
                    voter: voter(),
                    in_favor: true,
                },
                LedgerCall::FetchProposals,
            ]
        );
        ledger.clear_calls();
        assert!(ledger.calls().is_empty());
    }
}
