//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the governance core to external systems:
//! - `ledger` - Proposal/vote backends (in-memory, HTTP)
//! - `advisor` - AI insight providers (canned, Anthropic)

pub mod advisor;
pub mod ledger;

pub use advisor::{AdvisorCall, AnthropicAdvisor, AnthropicAdvisorConfig, CannedAdvisor};
pub use ledger::{HttpLedger, HttpLedgerConfig, InMemoryLedger, LedgerCall};
