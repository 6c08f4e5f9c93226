//! Domain service for the calculator.
//!
//! Validates operands, computes the result and validates it again. Checks run in a fixed
//! order: NaN, then Infinity across all operands, then the operation's own precondition,
//! then the finiteness of the result.

use std::time::Instant;

use calculator_sdk::{
    CalculationRequest, CalculationResponse, HealthStatus, Operands, Operation, RequestContext,
};
use tracing::{info, warn};

use super::error::DomainError;

/// Stateless arithmetic service.
#[derive(Debug, Clone)]
pub struct Service {
    version: String,
    started_at: Instant,
}

impl Default for Service {
    fn default() -> Self {
        Self::new(env!("CARGO_PKG_VERSION"))
    }
}

fn check_operands(operands: &[f64]) -> Result<(), DomainError> {
    if operands.iter().any(|v| v.is_nan()) {
        return Err(DomainError::NotANumber);
    }
    if operands.iter().any(|v| v.is_infinite()) {
        return Err(DomainError::Infinite);
    }
    Ok(())
}

fn check_result(value: f64) -> Result<f64, DomainError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(DomainError::Overflow)
    }
}

#[allow(clippy::unused_self)]
impl Service {
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            started_at: Instant::now(),
        }
    }

    /// # Errors
    /// Fails on non-finite operands or a non-finite sum.
    pub fn add(&self, a: f64, b: f64) -> Result<f64, DomainError> {
        check_operands(&[a, b])?;
        check_result(a + b)
    }

    /// # Errors
    /// Fails on non-finite operands or a non-finite difference.
    pub fn subtract(&self, a: f64, b: f64) -> Result<f64, DomainError> {
        check_operands(&[a, b])?;
        check_result(a - b)
    }

    /// # Errors
    /// Fails on non-finite operands or a non-finite product.
    pub fn multiply(&self, a: f64, b: f64) -> Result<f64, DomainError> {
        check_operands(&[a, b])?;
        check_result(a * b)
    }

    /// # Errors
    /// `DivisionByZero` when `b` is zero of either sign.
    pub fn divide(&self, a: f64, b: f64) -> Result<f64, DomainError> {
        check_operands(&[a, b])?;
        if b == 0.0 {
            return Err(DomainError::DivisionByZero);
        }
        check_result(a / b)
    }

    /// `base` raised to `exponent`. A negative base with a fractional exponent has no
    /// real result and is reported as `Overflow`.
    ///
    /// # Errors
    /// Fails on non-finite operands or a non-finite power.
    pub fn power(&self, base: f64, exponent: f64) -> Result<f64, DomainError> {
        check_operands(&[base, exponent])?;
        check_result(base.powf(exponent))
    }

    /// # Errors
    /// `NegativeSquareRoot` for operands below zero.
    pub fn sqrt(&self, value: f64) -> Result<f64, DomainError> {
        check_operands(&[value])?;
        if value < 0.0 {
            return Err(DomainError::NegativeSquareRoot);
        }
        check_result(value.sqrt())
    }

    /// `percentage` percent of `value`.
    ///
    /// # Errors
    /// `PercentageOutOfRange` unless `0 <= percentage <= 100`.
    pub fn percentage(&self, value: f64, percentage: f64) -> Result<f64, DomainError> {
        check_operands(&[value, percentage])?;
        if !(0.0..=100.0).contains(&percentage) {
            return Err(DomainError::PercentageOutOfRange);
        }
        check_result((value * percentage) / 100.0)
    }

    fn apply(&self, operation: Operation, operands: Operands) -> Result<f64, DomainError> {
        match (operation, operands) {
            (Operation::Add, Operands::Binary { operand1, operand2 }) => {
                self.add(operand1, operand2)
            }
            (Operation::Subtract, Operands::Binary { operand1, operand2 }) => {
                self.subtract(operand1, operand2)
            }
            (Operation::Multiply, Operands::Binary { operand1, operand2 }) => {
                self.multiply(operand1, operand2)
            }
            (Operation::Divide, Operands::Binary { operand1, operand2 }) => {
                self.divide(operand1, operand2)
            }
            (Operation::Power, Operands::Binary { operand1, operand2 }) => {
                self.power(operand1, operand2)
            }
            (Operation::Percentage, Operands::Binary { operand1, operand2 }) => {
                self.percentage(operand1, operand2)
            }
            (Operation::Sqrt, Operands::Unary { operand }) => self.sqrt(operand),
            (Operation::Sqrt, Operands::Binary { .. }) => Err(DomainError::OperandArity {
                operation,
                expected: 1,
            }),
            (_, Operands::Unary { .. }) => Err(DomainError::OperandArity {
                operation,
                expected: 2,
            }),
        }
    }

    /// Run one calculation and log its outcome under the request id.
    ///
    /// # Errors
    /// Returns the classified `DomainError` when validation fails.
    pub fn calculate(
        &self,
        ctx: &RequestContext,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, DomainError> {
        let operation = request.operation;
        match self.apply(operation, request.operands) {
            Ok(result) => {
                info!(
                    request_id = ctx.request_id(),
                    operation = %operation,
                    result,
                    "calculation succeeded"
                );
                Ok(CalculationResponse::new(result, operation))
            }
            Err(err) => {
                warn!(
                    request_id = ctx.request_id(),
                    operation = %operation,
                    error_code = %err.code(),
                    reason = %err.details(),
                    "calculation rejected"
                );
                Err(err)
            }
        }
    }

    #[must_use]
    pub fn health(&self) -> HealthStatus {
        HealthStatus {
            status: "UP".to_owned(),
            version: self.version.clone(),
            uptime_seconds: self.started_at.elapsed().as_secs(),
        }
    }
}
