//! Pure keypad state transitions.

use calculator_sdk::{CalculationRequest, Operation};

use crate::action::{Action, Digit};
use crate::format::{digit_count, format_result, parse_display};
use crate::state::{CalculatorState, DIGIT_LIMIT_MESSAGE, MAX_DIGITS};

/// Apply one action to `state`.
#[must_use]
pub fn reduce(state: CalculatorState, action: Action) -> CalculatorState {
    match action {
        Action::InputDigit(digit) => input_digit(state, digit),
        Action::InputDecimal => input_decimal(state),
        Action::SetOperation(op) => set_operation(state, op),
        Action::Percentage => set_operation(state, Operation::Percentage),
        Action::ToggleSign => toggle_sign(state),
        Action::Backspace => backspace(state),
        Action::Clear => CalculatorState::default(),
        Action::ClearError => CalculatorState {
            error: None,
            ..state
        },
        Action::SetLoading(is_loading) => CalculatorState { is_loading, ..state },
        Action::SetResult(result) => CalculatorState {
            display: format_result(result),
            current_value: Some(result),
            previous_value: None,
            operation: None,
            waiting_for_operand: true,
            is_loading: false,
            error: None,
        },
        Action::SetError(message) => CalculatorState {
            error: Some(message),
            is_loading: false,
            ..state
        },
    }
}

fn with_display(state: CalculatorState, display: String) -> CalculatorState {
    let current_value = Some(parse_display(&display));
    CalculatorState {
        display,
        current_value,
        waiting_for_operand: false,
        ..state
    }
}

fn digit_limit(state: CalculatorState) -> CalculatorState {
    CalculatorState {
        error: Some(DIGIT_LIMIT_MESSAGE.to_owned()),
        ..state
    }
}

fn input_digit(mut state: CalculatorState, digit: Digit) -> CalculatorState {
    state.error = None;

    let display = if state.waiting_for_operand || state.display == "0" {
        digit.as_char().to_string()
    } else {
        let mut extended = state.display.clone();
        extended.push(digit.as_char());
        extended
    };

    if digit_count(&display) > MAX_DIGITS {
        return digit_limit(state);
    }
    with_display(state, display)
}

fn input_decimal(mut state: CalculatorState) -> CalculatorState {
    state.error = None;

    if state.waiting_for_operand {
        return with_display(state, "0.".to_owned());
    }
    if state.display.contains('.') {
        return state;
    }
    if digit_count(&state.display) >= MAX_DIGITS {
        return digit_limit(state);
    }
    let display = format!("{}.", state.display);
    with_display(state, display)
}

fn toggle_sign(state: CalculatorState) -> CalculatorState {
    if state.error.is_some() {
        return state;
    }
    let value = parse_display(&state.display);
    if value == 0.0 {
        return state;
    }
    let display = match state.display.strip_prefix('-') {
        Some(positive) => positive.to_owned(),
        None => format!("-{}", state.display),
    };
    CalculatorState {
        display,
        current_value: Some(-value),
        ..state
    }
}

fn backspace(mut state: CalculatorState) -> CalculatorState {
    if state.has_digit_limit_error() {
        state.error = None;
    } else if state.error.is_some() {
        return state;
    }

    let mut display = state.display.clone();
    display.pop();
    let unparsable = display.replace(',', "").trim().parse::<f64>().is_err();
    if display.is_empty() || display == "-" || display == "-0" || unparsable {
        display = "0".to_owned();
    }
    let current_value = Some(parse_display(&display));
    CalculatorState {
        display,
        current_value,
        ..state
    }
}

fn set_operation(state: CalculatorState, operation: Operation) -> CalculatorState {
    if state.error.is_some() {
        return state;
    }
    let previous_value = match state.previous_value {
        Some(staged) if state.waiting_for_operand => staged,
        _ => parse_display(&state.display),
    };
    CalculatorState {
        previous_value: Some(previous_value),
        operation: Some(operation),
        waiting_for_operand: true,
        ..state
    }
}

/// An operator is staged and its right operand has been typed, so selecting another
/// operator must resolve this one first.
#[must_use]
pub fn has_pending_chain(state: &CalculatorState) -> bool {
    state.operation.is_some() && state.previous_value.is_some() && !state.waiting_for_operand
}

/// The request that resolves the staged operation, if there is one. With nothing staged
/// the display is used for both operands.
#[must_use]
pub fn pending_request(state: &CalculatorState) -> Option<CalculationRequest> {
    let operation = state.operation?;
    let current = state.display_value();
    if operation.is_unary() {
        return Some(CalculationRequest::sqrt(current));
    }
    let previous = state.previous_value.unwrap_or(current);
    Some(CalculationRequest::binary(operation, previous, current))
}
