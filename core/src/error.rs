//! Error types for the calculator client.
//!
//! # Design
//! Division by zero is deliberately absent: it is answered locally with
//! `Quotient::DivisionByZero` and never becomes an error. Every other
//! failure after construction belongs to one attempt and is retried; the
//! variant that reaches the caller is the one produced by the last attempt.

use thiserror::Error;

/// Errors returned by `CalculatorClient` and `RestCalculator`.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    /// The base URL or retry settings were rejected at construction.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// No response was received (connection failure, timeout, broken body).
    #[error("transport failure: {0}")]
    Transport(String),

    /// The server answered with a 4xx or 5xx status.
    #[error("HTTP {status}: {body}")]
    Remote { status: u16, body: String },

    /// A 2xx response whose body is not the expected JSON shape.
    #[error("malformed response: {0}")]
    MalformedResponse(String),
}

impl CalcError {
    /// Status code of a `Remote` error.
    pub fn status(&self) -> Option<u16> {
        match self {
            CalcError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether another attempt may succeed. Only configuration errors are
    /// permanent.
    pub fn is_retryable(&self) -> bool {
        !matches!(self, CalcError::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_error_exposes_status() {
        let err = CalcError::Remote {
            status: 503,
            body: "busy".to_string(),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.to_string(), "HTTP 503: busy");
        assert_eq!(CalcError::Transport("x".to_string()).status(), None);
    }

    #[test]
    fn only_configuration_errors_are_permanent() {
        assert!(!CalcError::Configuration("empty".to_string()).is_retryable());
        assert!(CalcError::Transport("timeout".to_string()).is_retryable());
        assert!(CalcError::MalformedResponse("eof".to_string()).is_retryable());
        assert!(CalcError::Remote {
            status: 404,
            body: String::new()
        }
        .is_retryable());
    }
}
