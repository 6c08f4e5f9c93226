use std::sync::Arc;

use axum::extract::Extension;
use axum::Json;
use calc_errors::ApiResult;
use calculator_sdk::{
    CalculationRequest, CalculationResponse, HealthStatus, Operation, RequestContext,
};

use super::dto::{BinaryOperationRequest, UnaryOperationRequest};
use super::extract::OperandsJson;
use crate::domain::service::Service;
use crate::middleware::request_id::XRequestId;

type ReqId = Option<Extension<XRequestId>>;

fn context(request_id: ReqId) -> RequestContext {
    request_id.map_or_else(RequestContext::unknown, |Extension(XRequestId(id))| {
        RequestContext::new(id)
    })
}

fn binary(
    svc: &Service,
    request_id: ReqId,
    operation: Operation,
    req: BinaryOperationRequest,
) -> ApiResult<Json<CalculationResponse>> {
    let (a, b) = req.operands()?;
    let response = svc.calculate(
        &context(request_id),
        CalculationRequest::binary(operation, a, b),
    )?;
    Ok(Json(response))
}

pub async fn add(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<BinaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    binary(&svc, request_id, Operation::Add, req)
}

pub async fn subtract(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<BinaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    binary(&svc, request_id, Operation::Subtract, req)
}

pub async fn multiply(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<BinaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    binary(&svc, request_id, Operation::Multiply, req)
}

pub async fn divide(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<BinaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    binary(&svc, request_id, Operation::Divide, req)
}

pub async fn power(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<BinaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    binary(&svc, request_id, Operation::Power, req)
}

pub async fn percentage(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<BinaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    binary(&svc, request_id, Operation::Percentage, req)
}

pub async fn sqrt(
    Extension(svc): Extension<Arc<Service>>,
    request_id: ReqId,
    OperandsJson(req): OperandsJson<UnaryOperationRequest>,
) -> ApiResult<Json<CalculationResponse>> {
    let operand = req.operand()?;
    let response = svc.calculate(&context(request_id), CalculationRequest::sqrt(operand))?;
    Ok(Json(response))
}

pub async fn health(Extension(svc): Extension<Arc<Service>>) -> Json<HealthStatus> {
    Json(svc.health())
}
