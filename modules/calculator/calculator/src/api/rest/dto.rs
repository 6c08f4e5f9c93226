//! Request bodies. Operands are optional here so that a missing or `null` field can be
//! reported as a validation error naming the field, rather than a generic parse failure.

use calc_errors::{ApiError, ErrorCode};
use serde::Deserialize;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct BinaryOperationRequest {
    #[serde(default)]
    pub operand1: Option<f64>,
    #[serde(default)]
    pub operand2: Option<f64>,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct UnaryOperationRequest {
    #[serde(default)]
    pub operand: Option<f64>,
}

fn required(value: Option<f64>, field: &str) -> Result<f64, ApiError> {
    value.ok_or_else(|| {
        ApiError::new(ErrorCode::Validation, "Validation error")
            .with_details(format!("{field} is required"))
    })
}

impl BinaryOperationRequest {
    /// # Errors
    /// CALC_006 naming the first absent operand.
    pub fn operands(self) -> Result<(f64, f64), ApiError> {
        Ok((
            required(self.operand1, "operand1")?,
            required(self.operand2, "operand2")?,
        ))
    }
}

impl UnaryOperationRequest {
    /// # Errors
    /// CALC_006 when `operand` is absent.
    pub fn operand(self) -> Result<f64, ApiError> {
        required(self.operand, "operand")
    }
}
