use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};
use axum::http::StatusCode;
use axum::Json;
use calc_errors::{ApiError, ErrorCode};
use serde::de::DeserializeOwned;

/// JSON body extractor whose rejections use the calculator error catalog.
#[derive(Debug, Clone, Copy, Default)]
pub struct OperandsJson<T>(pub T);

impl<S, T> FromRequest<S> for OperandsJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => Err(classify_rejection(&rejection)),
        }
    }
}

/// Wrong operand types and out-of-range literals are operand errors; everything else
/// about an unreadable body is a validation error.
pub fn classify_rejection(rejection: &JsonRejection) -> ApiError {
    let text = rejection.body_text();
    tracing::debug!(reason = %text, "rejected request body");

    if text.contains("number out of range") {
        return ApiError::new(ErrorCode::InvalidOperand, "Invalid operand (Infinity)")
            .with_details("Operands cannot be Infinity");
    }
    if matches!(rejection, JsonRejection::JsonDataError(_)) && text.contains("invalid type") {
        return ApiError::new(ErrorCode::InvalidOperand, "Invalid operand type")
            .with_details("Operands must be numbers");
    }

    let mut err = ApiError::new(ErrorCode::Validation, "Invalid request body");
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        err.status = StatusCode::PAYLOAD_TOO_LARGE;
        err = err.with_details("Request body too large");
    } else if matches!(rejection, JsonRejection::MissingJsonContentType(_)) {
        err = err.with_details("Expected Content-Type: application/json");
    } else {
        err = err.with_details("Malformed JSON");
    }
    err
}
