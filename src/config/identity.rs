//! Caller identity configuration

use serde::Deserialize;

use super::error::ValidationError;
use crate::domain::foundation::VoterIdentity;

/// Identity this client votes as
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityConfig {
    /// Voter principal passed to the ledger with every vote
    #[serde(default = "default_voter")]
    pub voter: String,
}

impl IdentityConfig {
    /// Build the typed voter identity
    pub fn voter_identity(&self) -> Result<VoterIdentity, ValidationError> {
        VoterIdentity::new(self.voter.clone()).map_err(|_| ValidationError::EmptyVoterIdentity)
    }

    /// Validate identity configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.voter_identity().map(|_| ())
    }
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            voter: default_voter(),
        }
    }
}

fn default_voter() -> String {
    "current-user.icp".to_string()
}
