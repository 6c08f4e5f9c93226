//! Assembles the calculator: service, limiter and router from one configuration.

use std::sync::Arc;

use axum::Router;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::config::{CalculatorConfig, ConfigError};
use crate::domain::service::Service;
use crate::local_client::CalculatorLocalClient;
use crate::middleware::rate_limit::FixedWindowLimiter;
use crate::router::build_router;

pub struct CalculatorModule {
    config: CalculatorConfig,
    service: Arc<Service>,
    limiter: Arc<FixedWindowLimiter>,
}

impl CalculatorModule {
    /// # Errors
    /// Returns `ConfigError` when the configuration cannot be served.
    pub fn new(config: CalculatorConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let service = Arc::new(Service::new(config.version.clone()));
        let limiter = Arc::new(FixedWindowLimiter::new(
            &config.rate_limit,
            config.rate_limit_exclusions(),
        ));
        info!(
            base_path = %config.base_path,
            rate_limit_enabled = config.rate_limit.enabled,
            rate_limit = config.rate_limit.limit,
            "calculator module initialized"
        );
        Ok(Self {
            config,
            service,
            limiter,
        })
    }

    #[must_use]
    pub fn config(&self) -> &CalculatorConfig {
        &self.config
    }

    #[must_use]
    pub fn router(&self) -> Router {
        build_router(self.service.clone(), self.limiter.clone(), &self.config)
    }

    #[must_use]
    pub fn local_client(&self) -> CalculatorLocalClient {
        CalculatorLocalClient::new(self.service.clone())
    }

    /// Start the background purge of expired rate limit windows.
    #[must_use]
    pub fn spawn_maintenance(&self, cancel: CancellationToken) -> Option<JoinHandle<()>> {
        if !self.config.rate_limit.enabled {
            return None;
        }
        let interval = self.limiter.window();
        Some(tokio::spawn(self.limiter.clone().run_purge(interval, cancel)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RateLimitConfig;

    #[test]
    fn invalid_config_is_refused() {
        let config = CalculatorConfig {
            base_path: "calc".to_owned(),
            ..CalculatorConfig::default()
        };
        assert!(matches!(
            CalculatorModule::new(config),
            Err(ConfigError::BasePath(_))
        ));
    }

    #[tokio::test]
    async fn maintenance_runs_only_with_rate_limiting() {
        let module = CalculatorModule::new(CalculatorConfig::default()).unwrap();
        assert_eq!(module.config().route_prefix(), "/api/v1");
        let cancel = CancellationToken::new();
        let handle = module.spawn_maintenance(cancel.clone()).unwrap();
        cancel.cancel();
        handle.await.unwrap();

        let disabled = CalculatorModule::new(CalculatorConfig {
            rate_limit: RateLimitConfig {
                enabled: false,
                ..RateLimitConfig::default()
            },
            ..CalculatorConfig::default()
        })
        .unwrap();
        assert!(disabled.spawn_maintenance(CancellationToken::new()).is_none());
    }
}
