//! Workflow error type.

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};
use crate::ports::{AdvisorError, LedgerError};

/// Why a workflow operation did not complete.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorkflowError {
    /// Another operation holds the busy gate; the request was not started.
    #[error("another operation is in progress")]
    Busy,

    /// The request was invalid and no collaborator was called.
    #[error(transparent)]
    Precondition(#[from] ValidationError),

    /// A ledger call failed; the view state was left as it was.
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// An advisor call failed; the view state was left as it was.
    #[error(transparent)]
    Advisor(#[from] AdvisorError),
}

impl WorkflowError {
    /// True when repeating the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Busy => true,
            Self::Precondition(_) => false,
            Self::Ledger(e) => e.is_retryable(),
            Self::Advisor(e) => e.is_retryable(),
        }
    }
}

impl From<WorkflowError> for DomainError {
    fn from(err: WorkflowError) -> Self {
        match err {
            WorkflowError::Busy => DomainError::new(ErrorCode::OperationInProgress, err.to_string()),
            WorkflowError::Precondition(e) => e.into(),
            WorkflowError::Ledger(e) => e.into(),
            WorkflowError::Advisor(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_keeps_validation_message() {
        let err = WorkflowError::from(ValidationError::empty_field("title"));
        assert_eq!(err.to_string(), "Field 'title' cannot be empty");
        assert!(!err.is_retryable());
    }

    #[test]
    fn retryability_follows_the_collaborator_error() {
        assert!(WorkflowError::from(LedgerError::network("reset")).is_retryable());
        assert!(!WorkflowError::from(LedgerError::rejected("closed")).is_retryable());
        assert!(WorkflowError::from(AdvisorError::rate_limited(5)).is_retryable());
        assert!(!WorkflowError::from(AdvisorError::AuthenticationFailed).is_retryable());
        assert!(WorkflowError::Busy.is_retryable());
    }

    #[test]
    fn busy_maps_to_operation_in_progress() {
        let err: DomainError = WorkflowError::Busy.into();
        assert_eq!(err.code, ErrorCode::OperationInProgress);
    }
}
