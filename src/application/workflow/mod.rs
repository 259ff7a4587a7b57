//! Workflow module - the coordinator between user actions and collaborators.
//!
//! The controller owns the [`GovernanceState`](crate::domain::governance::GovernanceState)
//! and is its only writer. A single busy gate keeps at most one
//! collaborator-bound operation in flight, so writes to the state never
//! interleave.

mod commands;
mod controller;
mod errors;
mod gate;

pub use commands::{CastVoteCommand, CastVoteResult, CreateProposalResult};
pub use controller::{WorkflowController, RETRYABLE_DETAIL};
pub use errors::WorkflowError;
