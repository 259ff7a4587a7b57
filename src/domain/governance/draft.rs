//! Scratch record for a proposal being written.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Draft edited field by field before submission.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProposalDraft {
    pub title: String,
    pub description: String,
    pub proposer: String,
}

impl ProposalDraft {
    /// Merges the supplied fields, leaving the others untouched.
    pub fn apply(&mut self, update: DraftUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(proposer) = update.proposer {
            self.proposer = proposer;
        }
    }

    /// Returns true when every field is blank.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.description.is_empty() && self.proposer.is_empty()
    }

    /// Checks that the draft can be submitted.
    ///
    /// # Errors
    ///
    /// - `EmptyField` naming the first empty field, in title, description,
    ///   proposer order. Text is passed through as typed.
    pub fn validate(&self) -> Result<NewProposal, ValidationError> {
        let title = required("title", &self.title)?;
        let description = required("description", &self.description)?;
        let proposer = required("proposer", &self.proposer)?;

        Ok(NewProposal {
            title,
            description,
            proposer,
        })
    }
}

fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value.to_string())
}

/// Partial update to a [`ProposalDraft`]. `None` fields are left as they are.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DraftUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub proposer: Option<String>,
}

impl DraftUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn proposer(mut self, proposer: impl Into<String>) -> Self {
        self.proposer = Some(proposer.into());
        self
    }
}

/// A validated draft, ready to be sent to the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewProposal {
    pub title: String,
    pub description: String,
    pub proposer: String,
}
