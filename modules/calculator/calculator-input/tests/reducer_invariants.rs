#![allow(clippy::unwrap_used)]

use calculator_input::format::{MAX_DISPLAY_LENGTH, digit_count, format_result};
use calculator_input::state::MAX_DIGITS;
use calculator_input::{Action, CalculatorState, Digit, reduce};
use calculator_sdk::Operation;
use proptest::prelude::*;

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => (0u8..10).prop_map(|d| Action::InputDigit(Digit::try_from(char::from(b'0' + d)).unwrap())),
        1 => Just(Action::InputDecimal),
        1 => Just(Action::ToggleSign),
        1 => Just(Action::Backspace),
        1 => Just(Action::Percentage),
        1 => Just(Action::SetOperation(Operation::Add)),
        1 => Just(Action::ClearError),
        1 => proptest::num::f64::ANY.prop_map(Action::SetResult),
    ]
}

proptest! {
    #[test]
    fn display_stays_well_formed(actions in proptest::collection::vec(action(), 0..64)) {
        let mut state = CalculatorState::new();
        for action in actions {
            state = reduce(state, action);

            let display = &state.display;
            prop_assert!(display == "0" || display.replace(',', "").parse::<f64>().is_ok_and(f64::is_finite),
                "unparsable display {display:?}");
            prop_assert!(display.matches('.').count() <= 1, "two points in {display:?}");
            prop_assert!(digit_count(display) <= MAX_DIGITS, "too many digits in {display:?}");
            prop_assert!(display != "-0");
        }
    }
}

proptest! {
    #[test]
    fn formatted_results_fit_and_parse(value in proptest::num::f64::ANY) {
        let text = format_result(value);
        prop_assert!(text.len() <= MAX_DISPLAY_LENGTH, "{text:?} too long");
        prop_assert!(digit_count(&text) <= MAX_DIGITS, "{text:?} has too many digits");
        prop_assert!(text.parse::<f64>().is_ok_and(f64::is_finite), "{text:?} does not parse");
        prop_assert!(text != "-0");
    }
}
