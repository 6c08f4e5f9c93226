//! Error catalog: the fixed set of codes the service can return.

use std::fmt;

use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::response::ApiError;

/// Static error definition from the catalog
#[derive(Debug, Clone, Copy)]
pub struct ErrDef {
    pub status: u16,
    pub code: &'static str,
    pub message: &'static str,
}

impl ErrDef {
    /// HTTP status for this definition, `500` if the catalog entry is malformed.
    #[must_use]
    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

const DIVISION_BY_ZERO: ErrDef = ErrDef {
    status: 400,
    code: "CALC_001",
    message: "Division by zero",
};

const INVALID_OPERAND: ErrDef = ErrDef {
    status: 400,
    code: "CALC_002",
    message: "Invalid operand",
};

const NEGATIVE_SQUARE_ROOT: ErrDef = ErrDef {
    status: 400,
    code: "CALC_003",
    message: "Negative number for square root",
};

const OVERFLOW: ErrDef = ErrDef {
    status: 400,
    code: "CALC_004",
    message: "Numerical overflow or underflow",
};

const INVALID_PERCENTAGE: ErrDef = ErrDef {
    status: 400,
    code: "CALC_005",
    message: "Invalid percentage value",
};

const VALIDATION: ErrDef = ErrDef {
    status: 400,
    code: "CALC_006",
    message: "Validation error",
};

const RATE_LIMITED: ErrDef = ErrDef {
    status: 429,
    code: "RATE_001",
    message: "Rate limit exceeded",
};

/// Machine-readable error code carried in every error body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorCode {
    #[serde(rename = "CALC_001")]
    DivisionByZero,
    #[serde(rename = "CALC_002")]
    InvalidOperand,
    #[serde(rename = "CALC_003")]
    NegativeSquareRoot,
    #[serde(rename = "CALC_004")]
    Overflow,
    #[serde(rename = "CALC_005")]
    InvalidPercentage,
    #[serde(rename = "CALC_006")]
    Validation,
    #[serde(rename = "RATE_001")]
    RateLimited,
}

impl ErrorCode {
    pub const ALL: [Self; 7] = [
        Self::DivisionByZero,
        Self::InvalidOperand,
        Self::NegativeSquareRoot,
        Self::Overflow,
        Self::InvalidPercentage,
        Self::Validation,
        Self::RateLimited,
    ];

    #[must_use]
    pub const fn def(self) -> &'static ErrDef {
        match self {
            Self::DivisionByZero => &DIVISION_BY_ZERO,
            Self::InvalidOperand => &INVALID_OPERAND,
            Self::NegativeSquareRoot => &NEGATIVE_SQUARE_ROOT,
            Self::Overflow => &OVERFLOW,
            Self::InvalidPercentage => &INVALID_PERCENTAGE,
            Self::Validation => &VALIDATION,
            Self::RateLimited => &RATE_LIMITED,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        self.def().code
    }

    #[must_use]
    pub fn status(self) -> StatusCode {
        self.def().status_code()
    }

    /// Look a code up by its wire form (`"CALC_001"`).
    #[must_use]
    pub fn parse(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_str() == code)
    }

    /// Error with the catalog's default message.
    pub fn to_error(self) -> ApiError {
        ApiError::new(self, self.def().message)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_round_trip_through_their_wire_form() {
        for code in ErrorCode::ALL {
            assert_eq!(ErrorCode::parse(code.as_str()), Some(code));
            let json = serde_json::to_string(&code).unwrap();
            assert_eq!(json, format!("\"{}\"", code.as_str()));
        }
        assert_eq!(ErrorCode::parse("CALC_999"), None);
    }

    #[test]
    fn only_rate_limit_is_not_a_bad_request() {
        for code in ErrorCode::ALL {
            let expected = if code == ErrorCode::RateLimited {
                StatusCode::TOO_MANY_REQUESTS
            } else {
                StatusCode::BAD_REQUEST
            };
            assert_eq!(code.status(), expected, "{code}");
        }
    }

    #[test]
    fn default_error_uses_catalog_message() {
        let err = ErrorCode::Overflow.to_error();
        assert_eq!(err.body.error_code, "CALC_004");
        assert_eq!(err.body.message, "Numerical overflow or underflow");
        assert_eq!(err.body.details, None);
    }
}
