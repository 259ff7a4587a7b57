//! Canned governance advisor.
//!
//! Returns fixed analysis and recommendation text, optionally after a
//! simulated delay. Used for demos and tests without calling a real model.
//!
//! # Features
//!
//! - Queued errors, consumed in order
//! - Simulated latency
//! - Call tracking for verification
//!
//! # Example
//!
//! ```ignore
//! let advisor = CannedAdvisor::new()
//!     .with_delay(Duration::from_millis(2000))
//!     .with_error(AdvisorError::unavailable("model overloaded"));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::foundation::ProposalId;
use crate::ports::{AdvisorError, GovernanceAdvisor};

const RECOMMENDATIONS: &str = "Current Governance Recommendations:

**Priority Items:**
1. The treasury allocation proposal shows strong support - consider fast-tracking
2. Token distribution proposal is controversial - needs more community discussion

**Strategic Insights:**
- Both proposals impact tokenomics significantly
- Consider combining proposals for holistic approach
- Community sentiment suggests growth-focused priorities

**Action Items:**
- Schedule community call for token distribution debate
- Create detailed implementation timeline for treasury allocation
- Consider governance parameter adjustments for better participation";

fn analysis_text(proposal_id: ProposalId) -> String {
    format!(
        "AI Analysis for Proposal {proposal_id}:

**Benefits:**
- Could accelerate ecosystem development
- Provides clear funding mechanism for developers
- Aligns with DAO's growth objectives

**Risks:**
- Large treasury allocation might impact token value
- Need robust oversight mechanisms
- Potential for fund misuse without proper governance

**Recommendations:**
- Implement milestone-based funding releases
- Establish clear success metrics
- Consider smaller initial allocation with expansion based on results"
    )
}

/// A request received by the advisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvisorCall {
    Analysis(ProposalId),
    Recommendations,
}

/// Advisor answering with fixed text.
#[derive(Debug, Clone, Default)]
pub struct CannedAdvisor {
    /// Errors returned by the next calls, in order, before canned text resumes.
    errors: Arc<Mutex<VecDeque<AdvisorError>>>,
    /// Simulated latency per request.
    delay: Duration,
    calls: Arc<Mutex<Vec<AdvisorCall>>>,
}

impl CannedAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Queues an error for the next call.
    pub fn with_error(self, error: AdvisorError) -> Self {
        lock(&self.errors).push_back(error);
        self
    }

    /// Queues an error on an advisor that is already shared.
    pub fn fail_next(&self, error: AdvisorError) {
        lock(&self.errors).push_back(error);
    }

    /// Returns all recorded calls.
    pub fn calls(&self) -> Vec<AdvisorCall> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    async fn answer(&self, call: AdvisorCall, text: impl FnOnce() -> String) -> Result<String, AdvisorError> {
        lock(&self.calls).push(call);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        let next_error = lock(&self.errors).pop_front();
        match next_error {
            Some(err) => Err(err),
            None => Ok(text()),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl GovernanceAdvisor for CannedAdvisor {
    async fn request_analysis(&self, proposal_id: ProposalId) -> Result<String, AdvisorError> {
        self.answer(AdvisorCall::Analysis(proposal_id), || analysis_text(proposal_id))
            .await
    }

    async fn request_recommendations(&self) -> Result<String, AdvisorError> {
        self.answer(AdvisorCall::Recommendations, || RECOMMENDATIONS.to_string())
            .await
    }
}
