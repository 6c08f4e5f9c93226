#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use calculator::{CalculatorConfig, CalculatorModule};
use calculator_input::session::expiry;
use calculator_input::{CalculatorSession, Digit, Key};
use calculator_sdk::{
    CalculationRequest, CalculationResponse, CalculatorClientV1, CalculatorError, HealthStatus,
    Operation,
};

/// Records requests and answers them from a script.
#[derive(Default)]
struct ScriptedClient {
    calls: Mutex<Vec<CalculationRequest>>,
    replies: Mutex<VecDeque<Result<CalculationResponse, CalculatorError>>>,
}

impl ScriptedClient {
    fn replying(replies: Vec<Result<CalculationResponse, CalculatorError>>) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::default(),
            replies: Mutex::new(replies.into()),
        })
    }

    fn calls(&self) -> Vec<CalculationRequest> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CalculatorClientV1 for ScriptedClient {
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, CalculatorError> {
        self.calls.lock().unwrap().push(request);
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected calculation request")
    }

    async fn health(&self) -> Result<HealthStatus, CalculatorError> {
        Err(CalculatorError::Transport("not scripted".to_owned()))
    }
}

fn ok(result: f64, operation: Operation) -> Result<CalculationResponse, CalculatorError> {
    Ok(CalculationResponse::new(result, operation))
}

async fn type_line<C>(session: &mut CalculatorSession<C>, line: &str)
where
    C: CalculatorClientV1 + ?Sized,
{
    for key in Key::parse_line(line).unwrap() {
        session.handle_key(key).await;
    }
}

fn local_session() -> CalculatorSession<dyn CalculatorClientV1> {
    let module = CalculatorModule::new(CalculatorConfig::default()).unwrap();
    let client: Arc<dyn CalculatorClientV1> = Arc::new(module.local_client());
    CalculatorSession::new(client)
}

#[tokio::test]
async fn equals_sends_staged_and_current_operands() {
    let client = ScriptedClient::replying(vec![ok(15.0, Operation::Add)]);
    let mut session = CalculatorSession::new(client.clone());

    type_line(&mut session, "10+5=").await;

    assert_eq!(
        client.calls(),
        vec![CalculationRequest::binary(Operation::Add, 10.0, 5.0)]
    );
    let state = session.state();
    assert_eq!(state.display, "15");
    assert_eq!(state.operation, None);
    assert!(state.waiting_for_operand);
    assert!(!state.is_loading);
}

#[tokio::test]
async fn chained_operator_resolves_pending_calculation_first() {
    let client = ScriptedClient::replying(vec![
        ok(5.0, Operation::Add),
        ok(20.0, Operation::Multiply),
    ]);
    let mut session = CalculatorSession::new(client.clone());

    type_line(&mut session, "2+3*").await;
    assert_eq!(session.state().display, "5");
    assert_eq!(session.state().previous_value, Some(5.0));
    assert_eq!(session.state().operation, Some(Operation::Multiply));
    assert_eq!(session.state().secondary_display().as_deref(), Some("5 *"));

    type_line(&mut session, "4=").await;
    assert_eq!(
        client.calls(),
        vec![
            CalculationRequest::binary(Operation::Add, 2.0, 3.0),
            CalculationRequest::binary(Operation::Multiply, 5.0, 4.0),
        ]
    );
    assert_eq!(session.state().display, "20");
}

#[tokio::test]
async fn division_by_zero_never_reaches_the_server() {
    let client = ScriptedClient::replying(Vec::new());
    let mut session = CalculatorSession::new(client.clone());

    type_line(&mut session, "8/0=").await;

    assert!(client.calls().is_empty());
    assert_eq!(session.state().error.as_deref(), Some("Cannot divide by zero"));
    assert!(!session.state().is_loading);
}

#[tokio::test]
async fn server_errors_are_translated() {
    let client = ScriptedClient::replying(vec![
        Err(CalculatorError::Api {
            status: 400,
            code: "CALC_004".to_owned(),
            message: "Numerical overflow or underflow".to_owned(),
            details: None,
        }),
        Err(CalculatorError::Timeout(Duration::from_secs(5))),
    ]);
    let mut session = CalculatorSession::new(client);

    type_line(&mut session, "10^400=").await;
    assert_eq!(session.state().error.as_deref(), Some("Number too large"));

    type_line(&mut session, "c 1+1=").await;
    assert_eq!(
        session.state().error.as_deref(),
        Some("Unable to connect to server")
    );
}

#[tokio::test]
async fn sqrt_applies_immediately() {
    let client = ScriptedClient::replying(vec![ok(3.0, Operation::Sqrt)]);
    let mut session = CalculatorSession::new(client.clone());

    type_line(&mut session, "9 sqrt").await;

    assert_eq!(client.calls(), vec![CalculationRequest::sqrt(9.0)]);
    assert_eq!(session.state().display, "3");
}

#[tokio::test]
async fn split_api_allows_typing_while_loading() {
    let client = ScriptedClient::replying(Vec::new());
    let mut session = CalculatorSession::new(client);
    type_line(&mut session, "6*7").await;

    let request = session
        .begin_calculation(CalculationRequest::binary(Operation::Multiply, 6.0, 7.0))
        .unwrap();
    assert!(session.state().is_loading);

    session.press_digit(Digit::try_from('1').unwrap());
    assert!(session.state().is_loading);

    session.finish_calculation(ok(42.0, request.operation));
    assert_eq!(session.state().display, "42");
    assert!(!session.state().is_loading);
}

#[tokio::test(start_paused = true)]
async fn errors_expire_after_three_seconds() {
    let client = ScriptedClient::replying(Vec::new());
    let mut session = CalculatorSession::new(client);

    type_line(&mut session, "5/0=").await;
    let deadline = session.error_deadline().unwrap();

    tokio::time::sleep(Duration::from_millis(2999)).await;
    assert!(!session.clear_expired_error());
    assert!(session.state().error.is_some());

    expiry(Some(deadline)).await;
    assert!(session.clear_expired_error());
    assert_eq!(session.state().error, None);
    assert_eq!(session.error_deadline(), None);
}

#[tokio::test(start_paused = true)]
async fn new_error_restarts_the_timer_and_input_cancels_it() {
    let client = ScriptedClient::replying(Vec::new());
    let mut session = CalculatorSession::new(client);

    type_line(&mut session, "5/0=").await;
    let first = session.error_deadline().unwrap();

    tokio::time::sleep(Duration::from_secs(1)).await;
    type_line(&mut session, "c").await;
    assert_eq!(session.error_deadline(), None);

    type_line(&mut session, "4 n r").await;
    let second = session.error_deadline().unwrap();
    assert!(second > first);
    assert_eq!(
        session.state().error.as_deref(),
        Some("Cannot calculate square root of negative number")
    );

    session.press_digit(Digit::try_from('2').unwrap());
    assert_eq!(session.error_deadline(), None);
}

#[tokio::test]
async fn local_client_runs_the_real_validator() {
    let mut session = local_session();

    type_line(&mut session, "100%25=").await;
    assert_eq!(session.state().display, "25");

    type_line(&mut session, "c 2^0.5=").await;
    assert!(session.state().display.starts_with("1.41421356"));

    type_line(&mut session, "c 50%120=").await;
    assert_eq!(session.state().error.as_deref(), Some("Invalid percentage"));

    type_line(&mut session, "c 10^400=").await;
    assert_eq!(session.state().error.as_deref(), Some("Number too large"));
}
