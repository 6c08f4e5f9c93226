use std::sync::LazyLock;

use axum::extract::Request;
use axum::http::{HeaderName, HeaderValue};
use axum::middleware::Next;
use axum::response::Response;
use calculator_sdk::REQUEST_ID_HEADER;
use regex::Regex;
use tower_http::request_id::{MakeRequestId, RequestId};

#[allow(clippy::expect_used)] // good regex, it doesn't panic
static SAFE_REQUEST_ID: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("static regex should not panic")
});

/// Request id of the current request, available to handlers as an extension.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct XRequestId(pub String);

#[must_use]
pub fn header() -> HeaderName {
    HeaderName::from_static(REQUEST_ID_HEADER)
}

#[must_use]
pub fn is_safe(value: &str) -> bool {
    SAFE_REQUEST_ID.is_match(value)
}

/// Generates a fresh UUID v4 when the request carries no usable id.
#[derive(Clone, Copy, Debug, Default)]
pub struct MakeReqId;

impl MakeRequestId for MakeReqId {
    fn make_request_id<B>(&mut self, _req: &axum::http::Request<B>) -> Option<RequestId> {
        let id = uuid::Uuid::new_v4().to_string();
        HeaderValue::from_str(&id).ok().map(RequestId::new)
    }
}

/// Drop client-supplied ids that are too long or contain unexpected characters,
/// so `SetRequestIdLayer` replaces them with a generated one.
pub async fn sanitize_request_id(mut req: Request, next: Next) -> Response {
    let hdr = header();
    let unsafe_id = req
        .headers()
        .get(&hdr)
        .is_some_and(|v| !v.to_str().is_ok_and(is_safe));
    if unsafe_id {
        tracing::debug!("discarding malformed request id");
        req.headers_mut().remove(&hdr);
    }
    next.run(req).await
}

/// Record the request id in the current span and expose it as an `XRequestId` extension.
pub async fn push_req_id_to_extensions(mut req: Request, next: Next) -> Response {
    let hdr = header();
    if let Some(rid) = req
        .headers()
        .get(&hdr)
        .and_then(|v| v.to_str().ok())
        .map(ToOwned::to_owned)
    {
        tracing::Span::current().record("request_id", rid.as_str());
        req.extensions_mut().insert(XRequestId(rid));
    }
    next.run(req).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ids_within_the_safe_alphabet() {
        assert!(is_safe("abc-123_XYZ"));
        assert!(is_safe(&"a".repeat(64)));
        assert!(is_safe("550e8400-e29b-41d4-a716-446655440000"));
    }

    #[test]
    fn rejects_unsafe_ids() {
        assert!(!is_safe(""));
        assert!(!is_safe(&"a".repeat(65)));
        assert!(!is_safe("abc def"));
        assert!(!is_safe("id\r\ninjected: yes"));
        assert!(!is_safe("<script>"));
    }

    #[test]
    fn generated_ids_are_uuids() {
        let req = axum::http::Request::new(());
        let id = MakeReqId.make_request_id(&req).unwrap();
        let text = id.header_value().to_str().unwrap();
        assert!(uuid::Uuid::parse_str(text).is_ok());
        assert!(is_safe(text));
    }
}
