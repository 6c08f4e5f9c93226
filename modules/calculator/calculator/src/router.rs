use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::Router;
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::field::Empty;

use crate::api::rest::routes;
use crate::config::CalculatorConfig;
use crate::cors;
use crate::domain::service::Service;
use crate::middleware::rate_limit::{self, FixedWindowLimiter};
use crate::middleware::request_id;

fn apply_trace_layer(router: Router) -> Router {
    router.layer(
        TraceLayer::new_for_http()
            .make_span_with(|req: &axum::http::Request<axum::body::Body>| {
                let rid = req
                    .headers()
                    .get(request_id::header())
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("n/a");
                tracing::info_span!(
                    "http_request",
                    method = %req.method(),
                    uri = %req.uri().path(),
                    version = ?req.version(),
                    request_id = %rid,
                    status = Empty,
                    latency_ms = Empty,
                )
            })
            .on_response(
                |res: &axum::http::Response<axum::body::Body>,
                 latency: std::time::Duration,
                 span: &tracing::Span| {
                    span.record("status", res.status().as_u16());
                    span.record("latency_ms", latency.as_millis());
                },
            ),
    )
}

/// Build the calculator router with its full middleware stack.
///
/// Layers are registered innermost first. At runtime requests flow:
/// sanitize request id → `SetRequestId` → `PropagateRequestId` → Trace →
/// `push_req_id_to_extensions` → Timeout → `BodyLimit` → CORS → `RateLimit` → Router.
pub fn build_router(
    service: Arc<Service>,
    limiter: Arc<FixedWindowLimiter>,
    config: &CalculatorConfig,
) -> Router {
    let mut router = routes::router(config.route_prefix()).layer(axum::Extension(service));

    // 9) Rate limiting
    router = router.layer(from_fn(
        move |req: axum::extract::Request, next: axum::middleware::Next| {
            let limiter = limiter.clone();
            rate_limit::rate_limit_middleware(limiter, req, next)
        },
    ));

    // 8) CORS
    if let Some(cors) = cors::build_cors_layer(&config.cors_allowed_origins) {
        router = router.layer(cors);
    }

    // 7) Body limit (applied by the JSON extractor)
    router = router.layer(DefaultBodyLimit::max(config.body_limit_bytes));

    // 6) Timeout
    router = router.layer(TimeoutLayer::with_status_code(
        StatusCode::GATEWAY_TIMEOUT,
        config.request_timeout,
    ));

    // 5) Record request_id into span + extensions
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));

    // 4) Trace
    router = apply_trace_layer(router);

    // 3) PropagateRequestId
    let x_request_id = request_id::header();
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));

    // 2) SetRequestId
    router = router.layer(SetRequestIdLayer::new(x_request_id, request_id::MakeReqId));

    // 1) Sanitize incoming request id (outermost)
    router.layer(from_fn(request_id::sanitize_request_id))
}
