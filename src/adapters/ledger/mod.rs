//! Governance ledger adapters.
//!
//! - `InMemoryLedger` - Working in-process backend with call recording
//! - `HttpLedger` - JSON client for a remote ledger service

mod http;
mod in_memory;

pub use http::{HttpLedger, HttpLedgerConfig};
pub use in_memory::{InMemoryLedger, LedgerCall};
