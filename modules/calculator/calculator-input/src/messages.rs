//! User-facing wording for failed calculations.

use calc_errors::ErrorCode;
use calculator_sdk::CalculatorError;

pub const CONNECTION_FAILED: &str = "Unable to connect to server";
pub const GENERIC_FAILURE: &str = "Something went wrong";

/// Friendly message for a catalog code, when there is one.
#[must_use]
pub fn message_for_code(code: ErrorCode) -> Option<&'static str> {
    match code {
        ErrorCode::DivisionByZero => Some("Cannot divide by zero"),
        ErrorCode::InvalidOperand => Some("Invalid number"),
        ErrorCode::NegativeSquareRoot => Some("Cannot calculate square root of negative number"),
        ErrorCode::Overflow => Some("Number too large"),
        ErrorCode::InvalidPercentage => Some("Invalid percentage"),
        ErrorCode::Validation => Some("Invalid input"),
        ErrorCode::RateLimited => None,
    }
}

#[must_use]
pub fn user_message(err: &CalculatorError) -> String {
    if err.is_connectivity() {
        return CONNECTION_FAILED.to_owned();
    }
    match err {
        CalculatorError::Api { code, message, .. } => ErrorCode::parse(code)
            .and_then(message_for_code)
            .map_or_else(|| message.clone(), ToOwned::to_owned),
        _ => GENERIC_FAILURE.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn api(code: &str, message: &str) -> CalculatorError {
        CalculatorError::Api {
            status: 400,
            code: code.to_owned(),
            message: message.to_owned(),
            details: None,
        }
    }

    #[test]
    fn catalog_codes_use_friendly_wording() {
        assert_eq!(user_message(&api("CALC_001", "Division by zero")), "Cannot divide by zero");
        assert_eq!(user_message(&api("CALC_004", "Numerical overflow")), "Number too large");
        assert_eq!(user_message(&api("CALC_006", "Validation error")), "Invalid input");
    }

    #[test]
    fn unmapped_codes_surface_server_message() {
        assert_eq!(
            user_message(&api("RATE_001", "Rate limit exceeded")),
            "Rate limit exceeded"
        );
        assert_eq!(user_message(&api("OTHER", "Teapot")), "Teapot");
    }

    #[test]
    fn connectivity_and_decoding_failures() {
        assert_eq!(
            user_message(&CalculatorError::Timeout(Duration::from_secs(5))),
            CONNECTION_FAILED
        );
        assert_eq!(
            user_message(&CalculatorError::Transport("refused".to_owned())),
            CONNECTION_FAILED
        );
        assert_eq!(
            user_message(&CalculatorError::UnexpectedResponse {
                status: 500,
                body: String::new()
            }),
            GENERIC_FAILURE
        );
        assert_eq!(
            user_message(&CalculatorError::InvalidRequest("bad uri".to_owned())),
            GENERIC_FAILURE
        );
    }
}
