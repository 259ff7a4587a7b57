//! Governance advisor adapters.
//!
//! - `CannedAdvisor` - Fixed text with simulated latency and error injection
//! - `AnthropicAdvisor` - Anthropic Messages API, prompted with ledger context

mod anthropic;
mod canned;

pub use anthropic::{AnthropicAdvisor, AnthropicAdvisorConfig};
pub use canned::{AdvisorCall, CannedAdvisor};
