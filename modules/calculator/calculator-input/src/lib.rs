//! Calculator keypad front end.
//!
//! `reducer::reduce` is the pure `(state, action) -> state` transition function.
//! `CalculatorSession` wraps it with the side effects: calling the calculator service,
//! sequencing operator chains and expiring error messages.

#![forbid(unsafe_code)]

pub mod action;
pub mod format;
pub mod keys;
pub mod messages;
pub mod reducer;
pub mod session;
pub mod state;
pub mod validation;

pub use action::{Action, Digit};
pub use keys::Key;
pub use reducer::reduce;
pub use session::CalculatorSession;
pub use state::CalculatorState;
