use std::sync::Arc;

use async_trait::async_trait;
use calc_errors::ApiError;
use calculator_sdk::{
    CalculationRequest, CalculationResponse, CalculatorClientV1, CalculatorError, HealthStatus,
    RequestContext,
};

use crate::domain::service::Service;

/// In-process `CalculatorClientV1` backed directly by the domain service.
pub struct CalculatorLocalClient {
    service: Arc<Service>,
}

impl CalculatorLocalClient {
    #[must_use]
    pub fn new(service: Arc<Service>) -> Self {
        Self { service }
    }
}

#[async_trait]
impl CalculatorClientV1 for CalculatorLocalClient {
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, CalculatorError> {
        let ctx = RequestContext::new(uuid::Uuid::new_v4().to_string());
        self.service
            .calculate(&ctx, request)
            .map_err(|e| ApiError::from(e).into())
    }

    async fn health(&self) -> Result<HealthStatus, CalculatorError> {
        Ok(self.service.health())
    }
}
