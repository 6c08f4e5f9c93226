//! `CalculatorClientV1` trait definition.
//!
//! This is the seam the front end talks through. The backend provides an
//! in-process implementation, and `HttpCalculatorClient` provides the remote one.

use async_trait::async_trait;

use crate::errors::CalculatorError;
use crate::models::{CalculationRequest, CalculationResponse, HealthStatus};

/// Public API trait for the calculator service (Version 1).
#[async_trait]
pub trait CalculatorClientV1: Send + Sync {
    /// Run one operation. Classified failures come back as `CalculatorError::Api`.
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, CalculatorError>;

    /// Liveness and version of the service.
    async fn health(&self) -> Result<HealthStatus, CalculatorError>;
}
