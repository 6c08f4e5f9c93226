//! Checks run before a request is sent, so obviously invalid input never reaches the server.

use calculator_sdk::{CalculationRequest, Operands, Operation};

pub const DIVIDE_BY_ZERO: &str = "Cannot divide by zero";
pub const NEGATIVE_SQRT: &str = "Cannot calculate square root of negative number";
pub const INVALID_PERCENTAGE: &str = "Invalid percentage";

#[must_use]
pub fn is_division_by_zero(divisor: f64) -> bool {
    divisor == 0.0
}

#[must_use]
pub fn is_negative_for_sqrt(operand: f64) -> bool {
    operand < 0.0
}

#[must_use]
pub fn is_percentage_out_of_range(percentage: f64) -> bool {
    !(0.0..=100.0).contains(&percentage)
}

/// The message to show instead of sending `request`, if it is certain to fail.
#[must_use]
pub fn pre_validate(request: &CalculationRequest) -> Option<&'static str> {
    match (request.operation, request.operands) {
        (Operation::Divide, Operands::Binary { operand2, .. }) if is_division_by_zero(operand2) => {
            Some(DIVIDE_BY_ZERO)
        }
        (Operation::Sqrt, Operands::Unary { operand }) if is_negative_for_sqrt(operand) => {
            Some(NEGATIVE_SQRT)
        }
        (Operation::Percentage, Operands::Binary { operand2, .. })
            if is_percentage_out_of_range(operand2) =>
        {
            Some(INVALID_PERCENTAGE)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catches_certain_failures() {
        assert_eq!(
            pre_validate(&CalculationRequest::binary(Operation::Divide, 1.0, 0.0)),
            Some(DIVIDE_BY_ZERO)
        );
        assert_eq!(pre_validate(&CalculationRequest::sqrt(-2.0)), Some(NEGATIVE_SQRT));
        assert_eq!(
            pre_validate(&CalculationRequest::binary(Operation::Percentage, 50.0, 120.0)),
            Some(INVALID_PERCENTAGE)
        );
    }

    #[test]
    fn lets_valid_requests_through() {
        assert_eq!(
            pre_validate(&CalculationRequest::binary(Operation::Divide, 0.0, 2.0)),
            None
        );
        assert_eq!(pre_validate(&CalculationRequest::sqrt(0.0)), None);
        assert_eq!(
            pre_validate(&CalculationRequest::binary(Operation::Percentage, 50.0, 100.0)),
            None
        );
        assert_eq!(
            pre_validate(&CalculationRequest::binary(Operation::Subtract, 1.0, 0.0)),
            None
        );
    }
}
