use calc_errors::ApiError;

use crate::domain::error::DomainError;

/// Map a domain failure onto its catalog code, message and details.
pub fn domain_error_to_api(e: DomainError) -> ApiError {
    ApiError::new(e.code(), e.to_string()).with_details(e.details())
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        domain_error_to_api(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use calc_errors::ErrorCode;

    #[test]
    fn division_by_zero_maps_to_calc_001() {
        let err: ApiError = DomainError::DivisionByZero.into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), Some(ErrorCode::DivisionByZero));
        assert_eq!(err.body.message, "Division by zero");
        assert_eq!(
            err.body.details.as_deref(),
            Some("Second operand cannot be zero")
        );
    }

    #[test]
    fn non_finite_operands_share_calc_002() {
        let nan: ApiError = DomainError::NotANumber.into();
        let inf: ApiError = DomainError::Infinite.into();
        assert_eq!(nan.body.error_code, "CALC_002");
        assert_eq!(inf.body.error_code, "CALC_002");
        assert_eq!(nan.body.message, "Invalid operand (NaN)");
        assert_eq!(inf.body.message, "Invalid operand (Infinity)");
    }
}
