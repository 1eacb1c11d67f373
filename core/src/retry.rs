//! Retry policy with exponential backoff.
//!
//! # Retry Strategy
//!
//! - Up to `max_attempts` attempts in total, the first one included
//! - Before attempt `n` (n >= 2) wait `base_delay * multiplier^(n-2)`
//! - No jitter: waits are deterministic so callers can bound call duration
//! - Errors that are not retryable end the loop at once
//! - When attempts run out, the last error is returned unchanged

use std::time::Duration;

use crate::error::CalcError;

/// Exponential backoff settings applied around one fallible call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, initial one included. Must be at least 1.
    pub max_attempts: u32,

    /// Wait before the second attempt.
    pub base_delay: Duration,

    /// Factor applied to the wait after each further failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    /// 3 attempts, waiting 1s then 2s.
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, base_delay: Duration, multiplier: f64) -> Self {
        Self {
            max_attempts,
            base_delay,
            multiplier,
        }
    }

    /// A policy that makes a single attempt.
    pub fn no_retry() -> Self {
        Self::new(1, Duration::ZERO, 1.0)
    }

    pub(crate) fn validate(&self) -> Result<(), CalcError> {
        if self.max_attempts == 0 {
            return Err(CalcError::Configuration(
                "retry policy must allow at least one attempt".to_string(),
            ));
        }
        if !self.multiplier.is_finite() || self.multiplier < 0.0 {
            return Err(CalcError::Configuration(format!(
                "backoff multiplier must be a non-negative finite number, got {}",
                self.multiplier
            )));
        }
        Ok(())
    }

    /// Wait before `attempt` (1-based). Zero for the first attempt.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        if attempt < 2 {
            return Duration::ZERO;
        }
        let factor = self.multiplier.powi(attempt as i32 - 2);
        Duration::try_from_secs_f64(self.base_delay.as_secs_f64() * factor)
            .unwrap_or(Duration::MAX)
    }

    /// Upper bound on the time spent waiting between attempts.
    pub fn total_backoff(&self) -> Duration {
        (2..=self.max_attempts)
            .map(|attempt| self.delay_before(attempt))
            .fold(Duration::ZERO, Duration::saturating_add)
    }

    /// Run `operation` under this policy, sleeping the current thread between
    /// attempts.
    pub fn run<T, F>(&self, operation: F) -> Result<T, CalcError>
    where
        F: FnMut(u32) -> Result<T, CalcError>,
    {
        self.run_with(std::thread::sleep, operation)
    }

    /// Run `operation` under this policy with a caller-supplied sleeper.
    ///
    /// `operation` receives the 1-based attempt number.
    pub fn run_with<T, F, S>(&self, mut sleep: S, mut operation: F) -> Result<T, CalcError>
    where
        F: FnMut(u32) -> Result<T, CalcError>,
        S: FnMut(Duration),
    {
        let max_attempts = self.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match operation(attempt) {
                Ok(value) => return Ok(value),
                Err(err) if !err.is_retryable() => return Err(err),
                Err(err) if attempt >= max_attempts => {
                    tracing::debug!(
                        attempts = attempt,
                        error = %err,
                        "retries exhausted"
                    );
                    return Err(err);
                }
                Err(err) => {
                    attempt += 1;
                    let delay = self.delay_before(attempt);
                    tracing::warn!(
                        retry = attempt,
                        max_attempts,
                        error = %err,
                        backoff_ms = delay.as_millis() as u64,
                        "attempt failed, backing off"
                    );
                    sleep(delay);
                }
            }
        }
    }
}
