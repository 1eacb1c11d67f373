//! Stateless HTTP request builder and response parser for the calculator API.
//!
//! # Design
//! `CalculatorClient` holds only a `base_url` and carries no mutable state
//! between calls. `build_operation` produces an `HttpRequest` and
//! `parse_result` consumes an `HttpResponse`; the caller (or
//! `RestCalculator`) executes the round-trip in between, keeping this half
//! deterministic and free of I/O.

use serde_json::Value;

use crate::error::CalcError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::OperationRequest;

/// Synchronous, stateless client for the calculator API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculatorClient {
    base_url: String,
}

impl CalculatorClient {
    /// Wrap `base_url` verbatim. Validation lives in `ClientConfig`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST {base_url}/{operation}/{operand1}/{operand2}` with no body.
    pub fn build_operation(&self, request: &OperationRequest) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Post,
            url: format!("{}{}", self.base_url, request.path()),
        }
    }

    /// Extract the `result` field of a successful response.
    ///
    /// An absent or `null` field yields `Ok(None)`.
    pub fn parse_result(&self, response: HttpResponse) -> Result<Option<f64>, CalcError> {
        check_status(&response)?;
        let body: Value = serde_json::from_str(&response.body)
            .map_err(|e| CalcError::MalformedResponse(e.to_string()))?;
        let object = body.as_object().ok_or_else(|| {
            CalcError::MalformedResponse(format!("expected a JSON object, got {body}"))
        })?;

        match object.get("result") {
            None | Some(Value::Null) => Ok(None),
            Some(value) => value.as_f64().map(Some).ok_or_else(|| {
                CalcError::MalformedResponse(format!("`result` is not a number: {value}"))
            }),
        }
    }
}

/// Map 4xx/5xx (and anything else outside 2xx) to `CalcError::Remote`.
fn check_status(response: &HttpResponse) -> Result<(), CalcError> {
    if response.is_success() {
        return Ok(());
    }
    Err(CalcError::Remote {
        status: response.status,
        body: response.body.clone(),
    })
}
