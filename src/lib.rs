//! DAO Governance - proposal, voting and AI decision-support core
//!
//! This crate implements the client-side workflow of a DAO governance tool:
//! members view proposals, cast yes/no votes, draft new proposals and ask an
//! AI advisor for analysis and recommendations. All network-bound actions go
//! through a single busy gate so view state is only ever written by one
//! operation at a time.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
