//! Transport-agnostic models of the calculator API.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The seven arithmetic operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Operation {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
    Sqrt,
    Percentage,
}

impl Operation {
    pub const ALL: [Self; 7] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Power,
        Self::Sqrt,
        Self::Percentage,
    ];

    /// Upper-case tag used in responses, e.g. `"ADD"`.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Add => "ADD",
            Self::Subtract => "SUBTRACT",
            Self::Multiply => "MULTIPLY",
            Self::Divide => "DIVIDE",
            Self::Power => "POWER",
            Self::Sqrt => "SQRT",
            Self::Percentage => "PERCENTAGE",
        }
    }

    /// Route segment below the API base path, e.g. `"add"`.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::Subtract => "subtract",
            Self::Multiply => "multiply",
            Self::Divide => "divide",
            Self::Power => "power",
            Self::Sqrt => "sqrt",
            Self::Percentage => "percentage",
        }
    }

    /// Keypad symbol shown in the secondary display.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Power => "^",
            Self::Sqrt => "sqrt",
            Self::Percentage => "%",
        }
    }

    #[must_use]
    pub const fn is_unary(self) -> bool {
        matches!(self, Self::Sqrt)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// Returned when a string names no known operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOperation(pub String);

impl fmt::Display for UnknownOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown operation '{}'", self.0)
    }
}

impl std::error::Error for UnknownOperation {}

impl FromStr for Operation {
    type Err = UnknownOperation;

    /// Accepts both the tag (`"ADD"`) and the path form (`"add"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|op| op.tag().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownOperation(s.to_owned()))
    }
}

/// Operands as they travel on the wire: `{operand1, operand2}` or `{operand}`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Operands {
    Binary { operand1: f64, operand2: f64 },
    Unary { operand: f64 },
}

impl Operands {
    /// All operand values in wire order.
    #[must_use]
    pub fn values(&self) -> Vec<f64> {
        match *self {
            Self::Binary { operand1, operand2 } => vec![operand1, operand2],
            Self::Unary { operand } => vec![operand],
        }
    }
}

/// One calculation to perform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationRequest {
    pub operation: Operation,
    pub operands: Operands,
}

impl CalculationRequest {
    #[must_use]
    pub fn binary(operation: Operation, operand1: f64, operand2: f64) -> Self {
        Self {
            operation,
            operands: Operands::Binary { operand1, operand2 },
        }
    }

    #[must_use]
    pub fn unary(operation: Operation, operand: f64) -> Self {
        Self {
            operation,
            operands: Operands::Unary { operand },
        }
    }

    #[must_use]
    pub fn sqrt(operand: f64) -> Self {
        Self::unary(Operation::Sqrt, operand)
    }
}

/// Successful calculation body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResponse {
    pub result: f64,
    pub operation: Operation,
    pub timestamp: DateTime<Utc>,
}

impl CalculationResponse {
    #[must_use]
    pub fn new(result: f64, operation: Operation) -> Self {
        Self {
            result,
            operation,
            timestamp: Utc::now(),
        }
    }
}

/// Health endpoint body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
}
