//! Submission gate.
//!
//! A soft client-side guard: while a reply is in flight, further
//! submissions are dropped rather than queued. The gate is released by
//! dropping the [`GatePass`], so every exit path of an emission (normal
//! completion, abort, panic) unlocks it.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Guard preventing overlapping submissions.
#[derive(Debug, Default)]
pub struct SubmitGate {
    running: Arc<AtomicBool>,
}

impl SubmitGate {
    pub fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Attempts to lock the gate.
    ///
    /// Returns `None` when a submission is already in flight; the caller
    /// drops that submission silently. On success the returned pass holds
    /// the lock until dropped.
    pub fn try_acquire(&self) -> Option<GatePass> {
        if self.running.swap(true, Ordering::SeqCst) {
            return None;
        }
        Some(GatePass {
            running: Arc::clone(&self.running),
        })
    }

    /// Returns true while a submission holds the gate.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// RAII pass for one accepted submission.
///
/// Moved into the emission task; the gate reopens when the pass drops.
#[derive(Debug)]
pub struct GatePass {
    running: Arc<AtomicBool>,
}

impl Drop for GatePass {
    fn drop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_acquire_is_refused_until_release() {
        let gate = SubmitGate::new();

        let pass = gate.try_acquire();
        assert!(pass.is_some());
        assert!(gate.is_running());
        assert!(gate.try_acquire().is_none());

        drop(pass);
        assert!(!gate.is_running());
        assert!(gate.try_acquire().is_some());
    }

    #[test]
    fn test_pass_releases_when_dropped_mid_scope() {
        let gate = SubmitGate::new();
        {
            let _pass = gate.try_acquire().unwrap();
            assert!(gate.is_running());
        }
        assert!(!gate.is_running());
    }
}
