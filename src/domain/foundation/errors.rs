//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    EmptyField,

    // Workflow errors
    OperationInProgress,

    // Not found errors
    ProposalNotFound,

    // Ledger errors
    LedgerUnavailable,
    LedgerRejected,

    // AI errors
    AdvisorError,
    RateLimited,

    // Infrastructure errors
    InvalidResponse,
    NetworkError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OperationInProgress => "OPERATION_IN_PROGRESS",
            ErrorCode::ProposalNotFound => "PROPOSAL_NOT_FOUND",
            ErrorCode::LedgerUnavailable => "LEDGER_UNAVAILABLE",
            ErrorCode::LedgerRejected => "LEDGER_REJECTED",
            ErrorCode::AdvisorError => "ADVISOR_ERROR",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::InvalidResponse => "INVALID_RESPONSE",
            ErrorCode::NetworkError => "NETWORK_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
///
/// This is the shape in which workflow failures are surfaced to the
/// presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

impl From<ValidationError> for DomainError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::EmptyField { field } => {
                DomainError::new(ErrorCode::EmptyField, err.to_string()).with_detail("field", field.clone())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("title");
        assert_eq!(format!("{}", err), "Field 'title' cannot be empty");
    }

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::ProposalNotFound, "Proposal 3 not found");
        assert_eq!(format!("{}", err), "[PROPOSAL_NOT_FOUND] Proposal 3 not found");
    }

    #[test]
    fn validation_error_converts_with_field_detail() {
        let err: DomainError = ValidationError::empty_field("proposer").into();
        assert_eq!(err.code, ErrorCode::EmptyField);
        assert_eq!(err.details.get("field"), Some(&"proposer".to_string()));
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::OperationInProgress), "OPERATION_IN_PROGRESS");
        assert_eq!(format!("{}", ErrorCode::LedgerUnavailable), "LEDGER_UNAVAILABLE");
    }
}
