//! Ports - Interfaces for external collaborators.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the governance core and the outside world. Adapters implement these ports.
//!
//! - `GovernanceLedger` - Proposal and vote backend (service of record)
//! - `GovernanceAdvisor` - AI analysis and recommendations

mod governance_advisor;
mod governance_ledger;

pub use governance_advisor::{AdvisorError, GovernanceAdvisor};
pub use governance_ledger::{GovernanceLedger, LedgerError};
