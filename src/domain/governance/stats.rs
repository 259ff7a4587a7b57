//! Aggregate voting statistics.

use serde::{Deserialize, Serialize};

/// Ledger-wide voting statistics.
///
/// Always taken from the ledger as a whole value. The proposal list and the
/// statistics are fetched independently and may briefly disagree, so these
/// numbers are never recomputed from the cached list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VotingStats {
    pub total_proposals: u64,
    pub active_proposals: u64,
    pub total_votes: u64,
}

impl VotingStats {
    pub fn new(total_proposals: u64, active_proposals: u64, total_votes: u64) -> Self {
        Self {
            total_proposals,
            active_proposals,
            total_votes,
        }
    }
}
