//! Proposal entity as reported by the governance ledger.
//!
//! The ledger is the service of record. The client only ever holds read-only
//! copies, replaced wholesale on every reload, so there are no mutators here.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{Percentage, ProposalId, Timestamp, ValidationError};

/// Lifecycle status of a proposal, owned by the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProposalStatus {
    /// Open for voting.
    Active,
    /// Voting has ended.
    Closed,
}

impl ProposalStatus {
    /// Returns true while the proposal accepts votes.
    pub fn is_active(&self) -> bool {
        matches!(self, ProposalStatus::Active)
    }
}

impl fmt::Display for ProposalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProposalStatus::Active => f.write_str("active"),
            ProposalStatus::Closed => f.write_str("closed"),
        }
    }
}

/// Yes/no tally for a proposal.
///
/// Counts are unsigned, so `for >= 0 && against >= 0` holds by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VoteTally {
    pub votes_for: u64,
    pub votes_against: u64,
}

impl VoteTally {
    /// Creates a tally from raw counts.
    pub fn new(votes_for: u64, votes_against: u64) -> Self {
        Self {
            votes_for,
            votes_against,
        }
    }

    /// Total number of votes cast.
    pub fn total(&self) -> u64 {
        self.votes_for.saturating_add(self.votes_against)
    }

    /// Share of "for" votes, or `None` if nobody has voted yet.
    pub fn approval(&self) -> Option<Percentage> {
        Percentage::from_ratio(self.votes_for, self.total())
    }
}

/// A governance proposal.
///
/// # Invariants
///
/// - `title` and `description` are non-empty
/// - all fields are immutable once the ledger has assigned the `id`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Proposal {
    id: ProposalId,
    title: String,
    description: String,
    proposer: String,
    tally: VoteTally,
    status: ProposalStatus,
    created_at: Timestamp,
}

impl Proposal {
    /// Builds a proposal from ledger data.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if title or description is empty
    pub fn new(
        id: ProposalId,
        title: impl Into<String>,
        description: impl Into<String>,
        proposer: impl Into<String>,
        tally: VoteTally,
        status: ProposalStatus,
        created_at: Timestamp,
    ) -> Result<Self, ValidationError> {
        let title = title.into();
        let description = description.into();
        let proposer = proposer.into();

        for (field, value) in [("title", &title), ("description", &description)] {
            if value.is_empty() {
                return Err(ValidationError::empty_field(field));
            }
        }

        Ok(Self {
            id,
            title,
            description,
            proposer,
            tally,
            status,
            created_at,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> ProposalId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn proposer(&self) -> &str {
        &self.proposer
    }

    pub fn tally(&self) -> VoteTally {
        self.tally
    }

    pub fn votes_for(&self) -> u64 {
        self.tally.votes_for
    }

    pub fn votes_against(&self) -> u64 {
        self.tally.votes_against
    }

    pub fn status(&self) -> ProposalStatus {
        self.status
    }

    /// Returns when the ledger recorded the proposal.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Share of "for" votes; hidden (`None`) when there are no votes.
    pub fn approval(&self) -> Option<Percentage> {
        self.tally.approval()
    }
}
