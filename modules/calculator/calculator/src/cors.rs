use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

use crate::middleware::request_id;

/// Build a CORS layer for `allowed_origins`, or `None` when the list is empty.
#[must_use]
pub fn build_cors_layer(allowed_origins: &[String]) -> Option<CorsLayer> {
    if allowed_origins.is_empty() {
        return None;
    }

    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            axum::http::header::CONTENT_TYPE,
            HeaderName::from_static(calculator_sdk::REQUEST_ID_HEADER),
        ])
        .expose_headers([request_id::header()]);

    if allowed_origins.iter().any(|o| o == "*") {
        warn!("CORS is configured with allowed_origins=['*']; any website may call the API");
        return Some(layer.allow_origin(Any));
    }

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                warn!(origin = %o, "ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    Some(layer.allow_origin(origins))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_origins_disable_cors() {
        assert!(build_cors_layer(&[]).is_none());
    }

    #[test]
    fn explicit_and_wildcard_origins_build_a_layer() {
        assert!(build_cors_layer(&["http://localhost:3000".to_owned()]).is_some());
        assert!(build_cors_layer(&["*".to_owned()]).is_some());
    }
}
