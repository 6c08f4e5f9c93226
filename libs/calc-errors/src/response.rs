//! Wire error body `{errorCode, message, details?, timestamp}`.

use std::fmt;

use chrono::{DateTime, Utc};
use http::StatusCode;
use serde::{Deserialize, Serialize};

use crate::catalog::ErrorCode;

/// Error body returned by every failing endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    /// Catalog code, e.g. `CALC_001`.
    pub error_code: String,
    /// Short human-readable summary.
    pub message: String,
    /// Optional explanation specific to this occurrence.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl ErrorResponse {
    /// The catalog entry for `error_code`, if it is one we know.
    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        ErrorCode::parse(&self.error_code)
    }
}

/// An `ErrorResponse` together with the HTTP status it is sent with.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Create an error for `code` with a specific message, stamped now.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            status: code.status(),
            body: ErrorResponse {
                error_code: code.as_str().to_owned(),
                message: message.into(),
                details: None,
                timestamp: Utc::now(),
            },
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.body.details = Some(details.into());
        self
    }

    #[must_use]
    pub fn code(&self) -> Option<ErrorCode> {
        self.body.code()
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.body.error_code, self.body.message)?;
        if let Some(details) = &self.body.details {
            write!(f, " ({details})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ApiError {}

/// Axum integration: make `ApiError` directly usable as a response
#[cfg(feature = "axum")]
impl axum::response::IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        tracing::debug!(
            status = self.status.as_u16(),
            error_code = %self.body.error_code,
            message = %self.body.message,
            "returning error response"
        );
        (self.status, axum::Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_omitted_when_absent() {
        let err = ApiError::new(ErrorCode::DivisionByZero, "Division by zero");
        let json = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json["errorCode"], "CALC_001");
        assert_eq!(json["message"], "Division by zero");
        assert!(json.get("details").is_none());
        assert!(json["timestamp"].is_string());
    }

    #[test]
    fn details_are_serialized_when_present() {
        let err = ApiError::new(ErrorCode::Validation, "Validation error")
            .with_details("operand1 is required");
        let json = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json["details"], "operand1 is required");
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
    }

    #[test]
    fn body_deserializes_without_details() {
        let json = r#"{"errorCode":"RATE_001","message":"Rate limit exceeded","timestamp":"2026-01-02T03:04:05Z"}"#;
        let body: ErrorResponse = serde_json::from_str(json).unwrap();
        assert_eq!(body.code(), Some(ErrorCode::RateLimited));
        assert_eq!(body.details, None);
    }

    #[test]
    fn display_includes_code_message_and_details() {
        let err = ApiError::new(ErrorCode::NegativeSquareRoot, "Negative number for square root")
            .with_details("Operand must be >= 0");
        assert_eq!(
            err.to_string(),
            "CALC_003: Negative number for square root (Operand must be >= 0)"
        );
    }
}
