//! Typewriter cancellation primitives.
//!
//! A typewriter emission checks an [`AbortToken`] before every write.
//! [`TypingAbort`] owns the single live token: starting a new emission
//! invalidates the previous token and hands out a fresh one, so at most one
//! emitter can ever pass the check. Tokens are replaced, never reset; an
//! aborted token stays aborted.

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, Ordering};

/// Cancellation handle for one typewriter emission.
///
/// Cheap to clone; all clones observe the same flag.
#[derive(Debug, Clone)]
pub struct AbortToken {
    flag: Arc<AtomicBool>,
}

impl AbortToken {
    fn fresh() -> Self {
        Self {
            flag: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Returns true once the emission this token belongs to is stale.
    pub fn is_aborted(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    fn abort(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }
}

/// Registry holding the abort token of the current emission.
///
/// There is always exactly one current token. `begin` aborts the previous
/// one and installs a replacement in a single critical section, so a switch
/// racing a new submission can never leave two live emitters.
#[derive(Debug)]
pub struct TypingAbort {
    current: Mutex<AbortToken>,
}

impl TypingAbort {
    pub fn new() -> Self {
        Self {
            current: Mutex::new(AbortToken::fresh()),
        }
    }

    /// Aborts the previous emission and returns the token for the next one.
    pub fn begin(&self) -> AbortToken {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.abort();
        let token = AbortToken::fresh();
        *current = token.clone();
        token
    }

    /// Aborts the current emission without starting a new one.
    ///
    /// The stored token stays in place; the next `begin` replaces it.
    pub fn abort_current(&self) {
        let current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        current.abort();
    }
}

impl Default for TypingAbort {
    fn default() -> Self {
        Self::new()
    }
}
