use axum::Router;
use axum::routing::{MethodRouter, get, post};
use calculator_sdk::Operation;

use super::handlers;

fn operation_route(operation: Operation) -> MethodRouter {
    match operation {
        Operation::Add => post(handlers::add),
        Operation::Subtract => post(handlers::subtract),
        Operation::Multiply => post(handlers::multiply),
        Operation::Divide => post(handlers::divide),
        Operation::Power => post(handlers::power),
        Operation::Sqrt => post(handlers::sqrt),
        Operation::Percentage => post(handlers::percentage),
    }
}

/// All calculator routes below `prefix`. Handlers expect an `Extension<Arc<Service>>`.
pub fn router(prefix: &str) -> Router {
    Operation::ALL
        .into_iter()
        .fold(Router::new(), |router, op| {
            router.route(&format!("{prefix}/{}", op.path()), operation_route(op))
        })
        .route(&format!("{prefix}/health"), get(handlers::health))
}
