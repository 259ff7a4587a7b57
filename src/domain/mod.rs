//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (value objects, IDs, errors)
//! - `governance` - Proposals, votes, statistics and the client view state

pub mod foundation;
pub mod governance;
