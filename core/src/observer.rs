//! Optional per-attempt notifications.
//!
//! A `RestCalculator` tells its observer about every request it is about to
//! send and every attempt that failed. Nothing is printed by default; the
//! observer is how a caller gets a "requesting ..." trace of its own.

use crate::error::CalcError;

/// Receives attempt-level events from `RestCalculator`.
///
/// Both methods default to no-ops.
pub trait RequestObserver: Send + Sync {
    /// Called right before attempt `attempt` (1-based) is sent to `url`.
    fn on_attempt(&self, url: &str, attempt: u32) {
        let _ = (url, attempt);
    }

    /// Called after attempt `attempt` failed with `error`.
    fn on_failure(&self, url: &str, attempt: u32, error: &CalcError) {
        let _ = (url, attempt, error);
    }
}

/// Closures observe attempts only.
impl<F> RequestObserver for F
where
    F: Fn(&str, u32) + Send + Sync,
{
    fn on_attempt(&self, url: &str, attempt: u32) {
        self(url, attempt)
    }
}
