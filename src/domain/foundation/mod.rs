//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types
//! that form the vocabulary of the governance domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{OperationId, ProposalId, VoterIdentity};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
