//! Domain values for calculator calls.
//!
//! # Design
//! `Operation` pins the wire names the remote service routes on. The
//! `Quotient` returned by `divide` carries the local division-by-zero
//! sentinel as a value rather than an error, and serializes to the
//! structured `{"error": ...}` payload callers may forward verbatim.

use std::fmt;

use serde::{Serialize, Serializer};

/// Message carried by the division-by-zero sentinel.
pub const DIVISION_BY_ZERO: &str = "division by zero";

/// The arithmetic operations the remote calculator understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Add,
        Operation::Subtract,
        Operation::Multiply,
        Operation::Divide,
    ];

    /// Path segment naming this operation on the wire.
    pub fn path_segment(self) -> &'static str {
        match self {
            Operation::Add => "soma",
            Operation::Subtract => "subtracao",
            Operation::Multiply => "multiplicacao",
            Operation::Divide => "divisao",
        }
    }

    pub fn from_path_segment(segment: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.path_segment() == segment)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

/// One call's worth of input, built per call and discarded afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OperationRequest {
    pub operation: Operation,
    pub operand1: f64,
    pub operand2: f64,
}

impl OperationRequest {
    pub fn new(operation: Operation, operand1: f64, operand2: f64) -> Self {
        Self {
            operation,
            operand1,
            operand2,
        }
    }

    /// `/{operation}/{operand1}/{operand2}`, operands rendered with `Display`.
    pub fn path(&self) -> String {
        format!(
            "/{}/{}/{}",
            self.operation, self.operand1, self.operand2
        )
    }
}

/// Outcome of `divide`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Quotient {
    /// The server's answer; `None` when the response carried no `result`.
    Value(Option<f64>),
    /// The divisor was zero; no request was sent.
    DivisionByZero,
}

impl Quotient {
    pub fn value(self) -> Option<f64> {
        match self {
            Quotient::Value(v) => v,
            Quotient::DivisionByZero => None,
        }
    }

    pub fn is_division_by_zero(self) -> bool {
        matches!(self, Quotient::DivisionByZero)
    }
}

impl fmt::Display for Quotient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quotient::Value(Some(v)) => write!(f, "{v}"),
            Quotient::Value(None) => f.write_str("null"),
            Quotient::DivisionByZero => write!(f, "error: {DIVISION_BY_ZERO}"),
        }
    }
}

#[derive(Serialize)]
struct ErrorPayload<'a> {
    error: &'a str,
}

impl Serialize for Quotient {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Quotient::Value(v) => v.serialize(serializer),
            Quotient::DivisionByZero => ErrorPayload {
                error: DIVISION_BY_ZERO,
            }
            .serialize(serializer),
        }
    }
}
