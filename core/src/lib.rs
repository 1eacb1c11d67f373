//! Blocking REST client for a remote calculator service.
//!
//! # Overview
//! Forwards addition, subtraction, multiplication and division to an HTTP
//! service at `POST {base_url}/{operation}/{a}/{b}` and returns the `result`
//! field of its JSON answer. Failed attempts are retried with exponential
//! backoff.
//!
//! # Design
//! - `CalculatorClient` is stateless: it builds `HttpRequest` values and
//!   parses `HttpResponse` values without touching the network.
//! - A `Transport` executes the round-trip; `UreqTransport` is the blocking
//!   default with a per-attempt timeout.
//! - `RetryPolicy` is an explicit value applied around each round-trip.
//! - `RestCalculator` composes the three and adds the local division-by-zero
//!   short-circuit plus an optional `RequestObserver`.

pub mod calculator;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod observer;
pub mod retry;
pub mod types;

pub use calculator::RestCalculator;
pub use client::CalculatorClient;
pub use config::{ClientConfig, DEFAULT_TIMEOUT};
pub use error::CalcError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use observer::RequestObserver;
pub use retry::RetryPolicy;
pub use types::{Operation, OperationRequest, Quotient, DIVISION_BY_ZERO};
