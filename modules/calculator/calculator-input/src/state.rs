use std::time::Duration;

use calculator_sdk::Operation;

use crate::format::{format_result, parse_display};

/// Most digits the display may hold, not counting sign or decimal point.
pub const MAX_DIGITS: usize = 15;

pub const DIGIT_LIMIT_MESSAGE: &str = "Maximum 15 digits allowed";

/// How long an error message stays on screen.
pub const ERROR_DISPLAY_DURATION: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, PartialEq)]
pub struct CalculatorState {
    pub display: String,
    /// Parsed value of the last edit or the last applied result.
    pub current_value: Option<f64>,
    /// Staged left operand.
    pub previous_value: Option<f64>,
    pub operation: Option<Operation>,
    /// The next digit starts a new number instead of extending `display`.
    pub waiting_for_operand: bool,
    pub is_loading: bool,
    pub error: Option<String>,
}

impl Default for CalculatorState {
    fn default() -> Self {
        Self {
            display: "0".to_owned(),
            current_value: None,
            previous_value: None,
            operation: None,
            waiting_for_operand: false,
            is_loading: false,
            error: None,
        }
    }
}

impl CalculatorState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Numeric value of `display`.
    #[must_use]
    pub fn display_value(&self) -> f64 {
        parse_display(&self.display)
    }

    /// `"<previous> <symbol>"` while an operation is staged.
    #[must_use]
    pub fn secondary_display(&self) -> Option<String> {
        match (self.previous_value, self.operation) {
            (Some(previous), Some(op)) => Some(format!("{} {}", format_result(previous), op.symbol())),
            _ => None,
        }
    }

    #[must_use]
    pub fn has_digit_limit_error(&self) -> bool {
        self.error.as_deref() == Some(DIGIT_LIMIT_MESSAGE)
    }
}
