//! The busy gate: at most one workflow operation in flight.

use std::sync::{Mutex, MutexGuard, PoisonError};

use crate::domain::governance::GovernanceState;

/// Locks the state, recovering from poisoning.
///
/// The lock is only ever held for synchronous reads and writes, never across
/// an await point.
pub(crate) fn lock(state: &Mutex<GovernanceState>) -> MutexGuard<'_, GovernanceState> {
    state.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Proof that the caller holds the busy gate.
///
/// Dropping the guard clears `busy`, whichever path the operation took.
#[must_use]
pub(crate) struct BusyGuard<'a> {
    state: &'a Mutex<GovernanceState>,
}

impl<'a> BusyGuard<'a> {
    /// Sets `busy` if the gate is free. Returns `None` while another
    /// operation holds it.
    pub(crate) fn acquire(state: &'a Mutex<GovernanceState>) -> Option<Self> {
        let mut guarded = lock(state);
        if guarded.is_busy() {
            return None;
        }
        guarded.set_busy(true);
        guarded.clear_failure();
        Some(Self { state })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        lock(self.state).set_busy(false);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_is_refused_while_held() {
        let state = Mutex::new(GovernanceState::new());

        let guard = BusyGuard::acquire(&state).unwrap();
        assert!(lock(&state).is_busy());
        assert!(BusyGuard::acquire(&state).is_none());

        drop(guard);
        assert!(!lock(&state).is_busy());
        assert!(BusyGuard::acquire(&state).is_some());
    }

    #[test]
    fn drop_clears_busy_on_unwind() {
        let state = Mutex::new(GovernanceState::new());

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _guard = BusyGuard::acquire(&state).unwrap();
            panic!("operation blew up");
        }));

        assert!(result.is_err());
        assert!(!lock(&state).is_busy());
    }
}
