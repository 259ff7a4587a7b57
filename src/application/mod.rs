//! Application layer - workflow coordination and read models.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! The workflow controller handles commands (write); the dashboard view is
//! the read model handed to presentation.

pub mod dashboard;
pub mod workflow;

pub use dashboard::{DashboardView, ProposalCard};
pub use workflow::{
    CastVoteCommand, CastVoteResult, CreateProposalResult, WorkflowController, WorkflowError,
};
