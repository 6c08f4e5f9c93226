//! Error type returned by `CalculatorClientV1` implementations.

use std::time::Duration;

use calc_errors::{ApiError, ErrorCode, ErrorResponse};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalculatorError {
    /// The service rejected the calculation with a catalogued error body.
    #[error("{code}: {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
        details: Option<String>,
    },

    /// The request never produced a response (connection refused, reset, ...).
    #[error("transport error: {0}")]
    Transport(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    /// A response arrived but could not be decoded.
    #[error("unexpected response (HTTP {status}): {body}")]
    UnexpectedResponse { status: u16, body: String },

    #[error("invalid request: {0}")]
    InvalidRequest(String),
}

impl CalculatorError {
    /// Build an `Api` error from a decoded error body.
    #[must_use]
    pub fn api(status: u16, body: ErrorResponse) -> Self {
        Self::Api {
            status,
            code: body.error_code,
            message: body.message,
            details: body.details,
        }
    }

    /// Catalogue code of an `Api` error, when the code is a known one.
    #[must_use]
    pub fn error_code(&self) -> Option<ErrorCode> {
        match self {
            Self::Api { code, .. } => ErrorCode::parse(code),
            _ => None,
        }
    }

    /// True for failures where the service could not be reached at all.
    #[must_use]
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Timeout(_))
    }
}

impl From<ApiError> for CalculatorError {
    fn from(err: ApiError) -> Self {
        Self::api(err.status.as_u16(), err.body)
    }
}
