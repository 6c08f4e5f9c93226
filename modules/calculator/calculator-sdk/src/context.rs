//! Per-request correlation context.

/// Header carrying the correlation identifier.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Correlation data passed from the transport layer into the domain service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: String,
}

impl RequestContext {
    #[must_use]
    pub fn new(request_id: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
        }
    }

    /// Context for calls that did not arrive with a request id.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new("unknown")
    }

    #[must_use]
    pub fn request_id(&self) -> &str {
        &self.request_id
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::unknown()
    }
}
