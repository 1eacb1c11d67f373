//! HTTP transport types and the blocking transport that executes them.
//!
//! # Design
//! `HttpRequest` and `HttpResponse` describe an HTTP exchange as plain data.
//! `CalculatorClient` builds requests and parses responses without touching
//! the network. A `Transport` performs the round-trip in between. Keeping
//! the I/O behind a trait lets the retry orchestration run against a
//! scripted transport in tests and against `UreqTransport` in production.

use std::fmt;
use std::time::Duration;

use crate::error::CalcError;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
}

/// An HTTP request described as plain data.
///
/// Built by `CalculatorClient::build_operation`. A `Transport` executes it
/// and hands back the corresponding `HttpResponse`. Calculator calls carry
/// no body and no headers.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
}

/// An HTTP response described as plain data.
///
/// Non-2xx statuses are carried here as data; interpreting them is the
/// parser's job, not the transport's.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes one HTTP round-trip.
///
/// Implementations return `CalcError::Transport` when no response was
/// received (timeout, refused connection, broken body) and `Ok` for every
/// response that arrived, whatever its status.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CalcError>;
}

/// Blocking transport backed by a shared `ureq` agent.
///
/// The agent applies `timeout` to each request as a whole and reports
/// 4xx/5xx responses as data, so the core client decides what a failing
/// status means.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent, timeout }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

impl fmt::Debug for UreqTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UreqTransport")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, CalcError> {
        let result = match request.method {
            HttpMethod::Post => self.agent.post(&request.url).send_empty(),
        };
        let mut response = result.map_err(|e| CalcError::Transport(e.to_string()))?;

        let status = response.status().as_u16();
        let body = response
            .body_mut()
            .read_to_string()
            .map_err(|e| CalcError::Transport(format!("reading response body: {e}")))?;

        Ok(HttpResponse { status, body })
    }
}
