//! Validated client configuration.

use std::time::Duration;

use crate::error::CalcError;
use crate::retry::RetryPolicy;

/// Per-attempt timeout applied when none is configured.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// Immutable settings of a `RestCalculator`.
///
/// `base_url` is stored verbatim; it is only checked for being non-empty and
/// carrying an http(s) scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    base_url: String,
    timeout: Duration,
    retry: RetryPolicy,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CalcError> {
        let base_url = base_url.into();
        if base_url.trim().is_empty() {
            return Err(CalcError::Configuration(
                "base URL must not be empty".to_string(),
            ));
        }
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(CalcError::Configuration(format!(
                "base URL must start with http:// or https://, got {base_url:?}"
            )));
        }
        Ok(Self {
            base_url,
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Result<Self, CalcError> {
        retry.validate()?;
        self.retry = retry;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn retry(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Longest a single call can block: every attempt timing out plus all
    /// backoff waits.
    pub fn worst_case_duration(&self) -> Duration {
        self.timeout
            .saturating_mul(self.retry.max_attempts)
            .saturating_add(self.retry.total_backoff())
    }
}
