//! Blocking calculator client: sans-IO core + transport + retry policy.
//!
//! # Design
//! `RestCalculator` owns an immutable `ClientConfig`, the stateless
//! `CalculatorClient`, and a `Transport`. All four operations go through
//! `perform_operation`, which wraps one build/execute/parse round-trip in
//! the configured `RetryPolicy`. `divide` answers a zero divisor locally
//! before reaching that path.

use std::fmt;
use std::sync::Arc;

use crate::client::CalculatorClient;
use crate::config::ClientConfig;
use crate::error::CalcError;
use crate::http::{Transport, UreqTransport};
use crate::observer::RequestObserver;
use crate::types::{Operation, OperationRequest, Quotient};

/// Client for a remote calculator reachable over REST.
///
/// Every call blocks until it succeeds or the retry policy gives up. The
/// client holds no mutable state and may be reused for any number of
/// sequential calls.
pub struct RestCalculator<T = UreqTransport> {
    config: ClientConfig,
    client: CalculatorClient,
    transport: T,
    observer: Option<Arc<dyn RequestObserver>>,
}

impl RestCalculator<UreqTransport> {
    /// Client with the default 5s timeout and 3-attempt backoff.
    pub fn new(base_url: &str) -> Result<Self, CalcError> {
        Ok(Self::from_config(ClientConfig::new(base_url)?))
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let transport = UreqTransport::new(config.timeout());
        Self::with_transport(config, transport)
    }
}

impl<T: Transport> RestCalculator<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            client: CalculatorClient::new(config.base_url()),
            config,
            transport,
            observer: None,
        }
    }

    /// Attach an observer notified of every attempt.
    pub fn with_observer(mut self, observer: Arc<dyn RequestObserver>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn add(&self, a: f64, b: f64) -> Result<Option<f64>, CalcError> {
        self.perform_operation(Operation::Add, a, b)
    }

    pub fn subtract(&self, a: f64, b: f64) -> Result<Option<f64>, CalcError> {
        self.perform_operation(Operation::Subtract, a, b)
    }

    pub fn multiply(&self, a: f64, b: f64) -> Result<Option<f64>, CalcError> {
        self.perform_operation(Operation::Multiply, a, b)
    }

    /// `a / b` computed remotely, or `Quotient::DivisionByZero` without any
    /// request when `b` is zero.
    pub fn divide(&self, a: f64, b: f64) -> Result<Quotient, CalcError> {
        if b == 0.0 {
            tracing::debug!(dividend = a, "division by zero answered locally");
            return Ok(Quotient::DivisionByZero);
        }
        self.perform_operation(Operation::Divide, a, b)
            .map(Quotient::Value)
    }

    /// Send `operation(p1, p2)` to the server under the retry policy.
    ///
    /// Returns the `result` field of the first successful response, or the
    /// error of the last attempt once the policy is exhausted.
    pub fn perform_operation(
        &self,
        operation: Operation,
        p1: f64,
        p2: f64,
    ) -> Result<Option<f64>, CalcError> {
        let request = self
            .client
            .build_operation(&OperationRequest::new(operation, p1, p2));

        self.config.retry().run(|attempt| {
            tracing::debug!(url = %request.url, attempt, "sending request");
            if let Some(observer) = &self.observer {
                observer.on_attempt(&request.url, attempt);
            }

            let outcome = self
                .transport
                .execute(&request)
                .and_then(|response| self.client.parse_result(response));

            if let (Err(err), Some(observer)) = (&outcome, &self.observer) {
                observer.on_failure(&request.url, attempt, err);
            }
            outcome
        })
    }
}

impl<T: fmt::Debug> fmt::Debug for RestCalculator<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RestCalculator")
            .field("config", &self.config)
            .field("transport", &self.transport)
            .field("observer", &self.observer.is_some())
            .finish()
    }
}
