//! Calculator SDK
//!
//! This crate provides everything needed to consume the calculator service:
//! - API trait (`CalculatorClientV1`)
//! - Model types (`Operation`, `CalculationRequest`, `CalculationResponse`, `HealthStatus`)
//! - Error type (`CalculatorError`)
//! - HTTP implementation of the trait (`HttpCalculatorClient`)
//!
//! ```ignore
//! use calculator_sdk::{CalculationRequest, CalculatorClientV1, HttpCalculatorClient, Operation};
//!
//! let client = HttpCalculatorClient::new(&HttpClientConfig::default());
//! let response = client.calculate(CalculationRequest::binary(Operation::Add, 10.0, 5.0)).await?;
//! assert_eq!(response.result, 15.0);
//! ```

#![forbid(unsafe_code)]

pub mod api;
pub mod client;
pub mod context;
pub mod errors;
pub mod models;

pub use api::CalculatorClientV1;
pub use client::{HttpCalculatorClient, HttpClientConfig};
pub use context::{REQUEST_ID_HEADER, RequestContext};
pub use errors::CalculatorError;
pub use models::{CalculationRequest, CalculationResponse, HealthStatus, Operands, Operation};
