#![allow(clippy::expect_used, dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use calculator::{CalculatorConfig, CalculatorModule};
use serde_json::Value;
use tower::ServiceExt;

pub fn router_with(config: CalculatorConfig) -> Router {
    CalculatorModule::new(config)
        .expect("valid config")
        .router()
}

pub fn router() -> Router {
    router_with(CalculatorConfig::default())
}

pub fn post_json(path: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

pub async fn send(router: &Router, req: Request<Body>) -> Response<Body> {
    router.clone().oneshot(req).await.expect("infallible")
}

pub async fn json_body(res: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}
