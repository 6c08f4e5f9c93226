//! Imperative shell around the reducer.
//!
//! A session owns the keypad state and a calculator client. Calculations are awaited
//! inline, so operator chains resolve one at a time. Front ends that want to keep
//! accepting input while a request is in flight can drive `begin_calculation` and
//! `finish_calculation` themselves.

use std::sync::Arc;

use calculator_sdk::{
    CalculationRequest, CalculationResponse, CalculatorClientV1, CalculatorError, Operation,
};
use tokio::time::Instant;
use tracing::debug;

use crate::action::{Action, Digit};
use crate::keys::Key;
use crate::messages::user_message;
use crate::reducer::{self, reduce};
use crate::state::{CalculatorState, ERROR_DISPLAY_DURATION};
use crate::validation::pre_validate;

pub struct CalculatorSession<C: CalculatorClientV1 + ?Sized> {
    client: Arc<C>,
    state: CalculatorState,
    error_deadline: Option<Instant>,
}

impl<C: CalculatorClientV1 + ?Sized> CalculatorSession<C> {
    #[must_use]
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            state: CalculatorState::default(),
            error_deadline: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> &CalculatorState {
        &self.state
    }

    /// When the current error message should disappear.
    #[must_use]
    pub fn error_deadline(&self) -> Option<Instant> {
        self.error_deadline
    }

    /// Apply `action`. A changed error message restarts its display timer; a cleared one
    /// cancels it.
    pub fn dispatch(&mut self, action: Action) {
        let previous_error = self.state.error.clone();
        self.state = reduce(std::mem::take(&mut self.state), action);
        if self.state.error != previous_error {
            self.error_deadline = self
                .state
                .error
                .as_ref()
                .map(|_| Instant::now() + ERROR_DISPLAY_DURATION);
        }
    }

    /// Clear the error if its display time is over. Returns whether it was cleared.
    pub fn clear_expired_error(&mut self) -> bool {
        match self.error_deadline {
            Some(deadline) if deadline <= Instant::now() => {
                self.dispatch(Action::ClearError);
                true
            }
            _ => false,
        }
    }

    pub fn press_digit(&mut self, digit: Digit) {
        self.dispatch(Action::InputDigit(digit));
    }

    pub fn press_decimal(&mut self) {
        self.dispatch(Action::InputDecimal);
    }

    pub fn toggle_sign(&mut self) {
        self.dispatch(Action::ToggleSign);
    }

    pub fn backspace(&mut self) {
        self.dispatch(Action::Backspace);
    }

    pub fn clear(&mut self) {
        self.dispatch(Action::Clear);
    }

    /// Select `operation`, first resolving a staged operation whose right operand has
    /// already been typed.
    pub async fn press_operator(&mut self, operation: Operation) {
        if self.state.error.is_some() {
            return;
        }
        if reducer::has_pending_chain(&self.state) {
            self.calculate_pending().await;
        }
        self.dispatch(Action::SetOperation(operation));
    }

    pub async fn press_percentage(&mut self) {
        self.press_operator(Operation::Percentage).await;
    }

    /// Resolve the staged operation, if any.
    pub async fn equals(&mut self) {
        if self.state.operation.is_some() {
            self.calculate_pending().await;
        }
    }

    /// Square root of the display, immediately.
    pub async fn sqrt(&mut self) {
        let request = CalculationRequest::sqrt(self.state.display_value());
        self.run(request).await;
    }

    pub async fn handle_key(&mut self, key: Key) {
        match key {
            Key::Digit(digit) => self.press_digit(digit),
            Key::Decimal => self.press_decimal(),
            Key::Operator(op) => self.press_operator(op).await,
            Key::Percentage => self.press_percentage().await,
            Key::Equals => self.equals().await,
            Key::Clear => self.clear(),
            Key::Backspace => self.backspace(),
            Key::ToggleSign => self.toggle_sign(),
            Key::Sqrt => self.sqrt().await,
        }
    }

    async fn calculate_pending(&mut self) {
        if let Some(request) = reducer::pending_request(&self.state) {
            self.run(request).await;
        }
    }

    async fn run(&mut self, request: CalculationRequest) {
        if let Some(request) = self.begin_calculation(request) {
            let outcome = self.client.calculate(request).await;
            self.finish_calculation(outcome);
        }
    }

    /// Clear the error and validate `request` locally. Returns the request to send, with
    /// the session marked as loading, or `None` when a local check already failed.
    pub fn begin_calculation(
        &mut self,
        request: CalculationRequest,
    ) -> Option<CalculationRequest> {
        self.dispatch(Action::ClearError);
        if let Some(message) = pre_validate(&request) {
            debug!(operation = %request.operation, reason = message, "calculation rejected locally");
            self.dispatch(Action::SetError(message.to_owned()));
            return None;
        }
        self.dispatch(Action::SetLoading(true));
        Some(request)
    }

    /// Apply the outcome of a request started with `begin_calculation`.
    pub fn finish_calculation(&mut self, outcome: Result<CalculationResponse, CalculatorError>) {
        match outcome {
            Ok(response) => self.dispatch(Action::SetResult(response.result)),
            Err(err) => {
                debug!(error = %err, "calculation failed");
                self.dispatch(Action::SetError(user_message(&err)));
            }
        }
    }
}

/// Completes at `deadline`, or never when there is none.
pub async fn expiry(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending().await,
    }
}
