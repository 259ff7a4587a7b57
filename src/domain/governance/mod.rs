//! Governance module - proposals, votes and the client view state.
//!
//! # Module Organization
//!
//! - `proposal` - Proposal entity, status and vote tally
//! - `stats` - Ledger-wide voting statistics
//! - `draft` - Scratch record for proposals being written
//! - `view` - Navigation target
//! - `state` - The view state container
//! - `time_ago` - Relative time labels

mod draft;
mod proposal;
mod state;
mod stats;
mod time_ago;
mod view;

pub use draft::{DraftUpdate, NewProposal, ProposalDraft};
pub use proposal::{Proposal, ProposalStatus, VoteTally};
pub use state::{AnalysisResult, GovernanceState};
pub use stats::VotingStats;
pub use time_ago::{format_elapsed_millis, format_time_ago};
pub use view::ActiveView;
