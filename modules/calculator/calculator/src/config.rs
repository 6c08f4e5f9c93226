use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration of the calculator module (`calculator:` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CalculatorConfig {
    /// Prefix of every route, e.g. `/api/v1`.
    pub base_path: String,
    /// Version reported by the health endpoint.
    pub version: String,
    #[serde(with = "calc_utils::humantime_serde")]
    pub request_timeout: Duration,
    pub body_limit_bytes: usize,
    /// Origins allowed by CORS. Empty disables the CORS layer, `"*"` allows any.
    pub cors_allowed_origins: Vec<String>,
    pub rate_limit: RateLimitConfig,
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
            version: env!("CARGO_PKG_VERSION").to_owned(),
            request_timeout: Duration::from_secs(30),
            body_limit_bytes: 16 * 1024,
            cors_allowed_origins: Vec::new(),
            rate_limit: RateLimitConfig::default(),
        }
    }
}

fn default_base_path() -> String {
    "/api/v1".to_owned()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests admitted per client within one window.
    pub limit: u32,
    #[serde(with = "calc_utils::humantime_serde")]
    pub window: Duration,
    /// Paths that bypass the limiter. Unset means the health endpoint only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exclude_paths: Option<Vec<String>>,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            limit: 100,
            window: Duration::from_secs(60),
            exclude_paths: None,
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("base_path must start with '/' and must not end with '/': {0:?}")]
    BasePath(String),
    #[error("body_limit_bytes must be greater than zero")]
    BodyLimit,
    #[error("request_timeout must be greater than zero")]
    RequestTimeout,
    #[error("rate_limit.limit must be greater than zero")]
    RateLimit,
    #[error("rate_limit.window must be greater than zero")]
    RateWindow,
}

impl CalculatorConfig {
    /// Check values that deserialize fine but cannot be served.
    ///
    /// # Errors
    /// Returns the first invalid setting found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base = &self.base_path;
        if !base.starts_with('/') || (base.len() > 1 && base.ends_with('/')) {
            return Err(ConfigError::BasePath(base.clone()));
        }
        if self.body_limit_bytes == 0 {
            return Err(ConfigError::BodyLimit);
        }
        if self.request_timeout.is_zero() {
            return Err(ConfigError::RequestTimeout);
        }
        if self.rate_limit.enabled {
            if self.rate_limit.limit == 0 {
                return Err(ConfigError::RateLimit);
            }
            if self.rate_limit.window.is_zero() {
                return Err(ConfigError::RateWindow);
            }
        }
        Ok(())
    }

    /// Route prefix with a root base path collapsed, so routes never start with `//`.
    #[must_use]
    pub fn route_prefix(&self) -> &str {
        self.base_path.trim_end_matches('/')
    }

    #[must_use]
    pub fn health_path(&self) -> String {
        format!("{}/health", self.route_prefix())
    }

    /// Paths the rate limiter skips.
    #[must_use]
    pub fn rate_limit_exclusions(&self) -> Vec<String> {
        self.rate_limit
            .exclude_paths
            .clone()
            .unwrap_or_else(|| vec![self.health_path()])
    }
}
