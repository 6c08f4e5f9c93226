//! Calculator module implementation.
//!
//! The public API is defined in `calculator-sdk` and re-exported here. This crate adds the
//! validating domain service, the REST routes, and the HTTP middleware stack around them.

#![forbid(unsafe_code)]

pub use calculator_sdk::{
    CalculationRequest, CalculationResponse, CalculatorClientV1, CalculatorError, HealthStatus,
    Operation, RequestContext,
};

pub mod config;
pub mod local_client;
pub mod module;

pub use config::{CalculatorConfig, ConfigError, RateLimitConfig};
pub use local_client::CalculatorLocalClient;
pub use module::CalculatorModule;

#[doc(hidden)]
pub mod api;
#[doc(hidden)]
pub mod cors;
#[doc(hidden)]
pub mod domain;
#[doc(hidden)]
pub mod middleware;
#[doc(hidden)]
pub mod router;
