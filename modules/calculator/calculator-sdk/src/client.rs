//! HTTP implementation of `CalculatorClientV1`.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use calc_errors::ErrorResponse;
use http::header::{ACCEPT, CONTENT_TYPE};
use http::{Method, Request, StatusCode};
use http_body_util::{BodyExt, Full};
use hyper_util::client::legacy::Client;
use hyper_util::client::legacy::connect::HttpConnector;
use hyper_util::rt::TokioExecutor;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::api::CalculatorClientV1;
use crate::context::REQUEST_ID_HEADER;
use crate::errors::CalculatorError;
use crate::models::{CalculationRequest, CalculationResponse, HealthStatus};

const BODY_PREVIEW_LEN: usize = 256;

/// Where the service lives and how long to wait for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HttpClientConfig {
    /// Base URL including the API prefix, e.g. `http://localhost:8080/api/v1`.
    pub base_url: String,
    #[serde(with = "calc_utils::humantime_serde")]
    pub timeout: Duration,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_owned(),
            timeout: Duration::from_secs(5),
        }
    }
}

/// Calculator client speaking JSON over HTTP/1.
#[derive(Clone)]
pub struct HttpCalculatorClient {
    http: Client<HttpConnector, Full<Bytes>>,
    base_url: String,
    timeout: Duration,
}

impl HttpCalculatorClient {
    #[must_use]
    pub fn new(config: &HttpClientConfig) -> Self {
        let http = Client::builder(TokioExecutor::new()).build_http();
        Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
            timeout: config.timeout,
        }
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn build_request(
        &self,
        method: Method,
        path: &str,
        body: Option<Bytes>,
    ) -> Result<Request<Full<Bytes>>, CalculatorError> {
        let mut builder = Request::builder()
            .method(method)
            .uri(format!("{}/{path}", self.base_url))
            .header(ACCEPT, "application/json")
            .header(REQUEST_ID_HEADER, Uuid::new_v4().to_string());
        if body.is_some() {
            builder = builder.header(CONTENT_TYPE, "application/json");
        }
        builder
            .body(Full::new(body.unwrap_or_default()))
            .map_err(|e| CalculatorError::InvalidRequest(e.to_string()))
    }

    /// Send the request and buffer the whole response body within the timeout.
    async fn send(
        &self,
        request: Request<Full<Bytes>>,
    ) -> Result<(StatusCode, Bytes), CalculatorError> {
        let exchange = async {
            let response = self
                .http
                .request(request)
                .await
                .map_err(|e| CalculatorError::Transport(e.to_string()))?;
            let status = response.status();
            let body = response
                .into_body()
                .collect()
                .await
                .map_err(|e| CalculatorError::Transport(e.to_string()))?
                .to_bytes();
            Ok((status, body))
        };

        tokio::time::timeout(self.timeout, exchange)
            .await
            .map_err(|_| CalculatorError::Timeout(self.timeout))?
    }
}

fn preview(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    text.chars().take(BODY_PREVIEW_LEN).collect()
}

/// Decode a success body into `T`, or an error body into `CalculatorError::Api`.
fn decode<T: DeserializeOwned>(status: StatusCode, body: &[u8]) -> Result<T, CalculatorError> {
    let unexpected = || CalculatorError::UnexpectedResponse {
        status: status.as_u16(),
        body: preview(body),
    };

    if status.is_success() {
        return serde_json::from_slice(body).map_err(|_| unexpected());
    }

    match serde_json::from_slice::<ErrorResponse>(body) {
        Ok(error) => Err(CalculatorError::api(status.as_u16(), error)),
        Err(_) => Err(unexpected()),
    }
}

#[async_trait]
impl CalculatorClientV1 for HttpCalculatorClient {
    async fn calculate(
        &self,
        request: CalculationRequest,
    ) -> Result<CalculationResponse, CalculatorError> {
        let payload = serde_json::to_vec(&request.operands)
            .map_err(|e| CalculatorError::InvalidRequest(e.to_string()))?;
        let http_request =
            self.build_request(Method::POST, request.operation.path(), Some(payload.into()))?;

        debug!(operation = %request.operation, "sending calculation request");
        let (status, body) = self.send(http_request).await?;
        debug!(operation = %request.operation, status = status.as_u16(), "calculation response received");

        decode(status, &body)
    }

    async fn health(&self) -> Result<HealthStatus, CalculatorError> {
        let http_request = self.build_request(Method::GET, "health", None)?;
        let (status, body) = self.send(http_request).await?;
        decode(status, &body)
    }
}
