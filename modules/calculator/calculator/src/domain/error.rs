use calc_errors::ErrorCode;
use calculator_sdk::Operation;
use thiserror::Error;

/// Why a calculation was refused.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid operand (NaN)")]
    NotANumber,

    #[error("Invalid operand (Infinity)")]
    Infinite,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("Negative number for square root")]
    NegativeSquareRoot,

    #[error("Invalid percentage value")]
    PercentageOutOfRange,

    #[error("Numerical overflow or underflow")]
    Overflow,

    /// Binary operands for sqrt, or a single operand for a binary operation.
    #[error("Validation error")]
    OperandArity { operation: Operation, expected: u8 },
}

impl DomainError {
    #[must_use]
    pub fn code(self) -> ErrorCode {
        match self {
            Self::NotANumber | Self::Infinite => ErrorCode::InvalidOperand,
            Self::DivisionByZero => ErrorCode::DivisionByZero,
            Self::NegativeSquareRoot => ErrorCode::NegativeSquareRoot,
            Self::PercentageOutOfRange => ErrorCode::InvalidPercentage,
            Self::Overflow => ErrorCode::Overflow,
            Self::OperandArity { .. } => ErrorCode::Validation,
        }
    }

    #[must_use]
    pub fn details(self) -> String {
        match self {
            Self::NotANumber => "Operands cannot be NaN".to_owned(),
            Self::Infinite => "Operands cannot be Infinity".to_owned(),
            Self::DivisionByZero => "Second operand cannot be zero".to_owned(),
            Self::NegativeSquareRoot => "Operand must be >= 0".to_owned(),
            Self::PercentageOutOfRange => "Percentage must be between 0 and 100".to_owned(),
            Self::Overflow => "Result exceeds f64 limits".to_owned(),
            Self::OperandArity {
                operation,
                expected: 1,
            } => format!("{operation} takes exactly one operand"),
            Self::OperandArity { operation, .. } => {
                format!("{operation} takes exactly two operands")
            }
        }
    }
}
