//! Layered application configuration.
//!
//! Sources, lowest precedence first: built-in defaults, the YAML file given with
//! `--config`, `CALC__*` environment variables (`__` separates nested keys), and
//! finally CLI overrides.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, ensure};
use calculator::CalculatorConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

pub const ENV_PREFIX: &str = "CALC__";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub calculator: CalculatorConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// How long in-flight requests may take to drain after a shutdown signal.
    #[serde(with = "calc_utils::humantime_serde")]
    pub shutdown_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 8080)),
            shutdown_timeout: Duration::from_secs(10),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LoggingConfig {
    /// Default filter directive, e.g. `info` or `calculator=debug,info`.
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Merge defaults, the optional YAML file and the environment.
    ///
    /// # Errors
    /// Fails when the file is missing or unreadable, or the merged result does not
    /// deserialize.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            ensure!(path.is_file(), "config file does not exist: {}", path.display());
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    pub fn apply_cli_overrides(&mut self, port: Option<u16>) {
        if let Some(port) = port {
            self.server.bind_addr.set_port(port);
        }
    }

    /// # Errors
    /// Fails when a section holds values that cannot be served.
    pub fn validate(&self) -> Result<()> {
        self.calculator
            .validate()
            .context("invalid calculator configuration")
    }

    /// # Errors
    /// Fails only if serialization fails.
    pub fn to_pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("failed to serialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".yaml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn defaults_without_sources() {
        temp_env::with_vars_unset(
            ["CALC__SERVER__BIND_ADDR", "CALC__LOGGING__LEVEL"],
            || {
                let cfg = AppConfig::load(None).unwrap();
                assert_eq!(cfg, AppConfig::default());
                assert_eq!(cfg.server.bind_addr.port(), 8080);
                assert_eq!(cfg.logging.format, LogFormat::Text);
            },
        );
    }

    #[test]
    fn yaml_then_env_then_cli() {
        let file = yaml_file(
            r"
server:
  bind_addr: 127.0.0.1:9000
logging:
  level: debug
  format: json
calculator:
  rate_limit:
    limit: 10
    window: 30s
",
        );

        temp_env::with_vars(
            [
                ("CALC__LOGGING__LEVEL", Some("warn")),
                ("CALC__CALCULATOR__RATE_LIMIT__LIMIT", Some("7")),
            ],
            || {
                let mut cfg = AppConfig::load(Some(file.path())).unwrap();
                assert_eq!(cfg.logging.level, "warn");
                assert_eq!(cfg.logging.format, LogFormat::Json);
                assert_eq!(cfg.calculator.rate_limit.limit, 7);
                assert_eq!(cfg.calculator.rate_limit.window, Duration::from_secs(30));
                assert_eq!(cfg.server.bind_addr.port(), 9000);

                cfg.apply_cli_overrides(Some(7070));
                assert_eq!(cfg.server.bind_addr, "127.0.0.1:7070".parse().unwrap());
            },
        );
    }

    #[test]
    fn env_durations_accept_humantime() {
        temp_env::with_var("CALC__CALCULATOR__REQUEST_TIMEOUT", Some("2m"), || {
            let cfg = AppConfig::load(None).unwrap();
            assert_eq!(cfg.calculator.request_timeout, Duration::from_secs(120));
        });
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let file = yaml_file("server:\n  bind_adr: 127.0.0.1:1\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(AppConfig::load(Some(Path::new("/nonexistent/calc.yaml"))).is_err());
    }

    #[test]
    fn validate_reports_calculator_section() {
        let mut cfg = AppConfig::default();
        cfg.calculator.base_path = "no-slash".to_owned();
        let err = cfg.validate().unwrap_err();
        assert!(format!("{err:#}").contains("base_path"));
    }

    #[test]
    fn printed_config_round_trips_through_yaml() {
        let json = AppConfig::default().to_pretty_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["calculator"]["rate_limit"]["window"], "1m");

        let yaml = "logging:\n  level: trace\n";
        let cfg: AppConfig = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(cfg.logging.level, "trace");
        assert_eq!(cfg.server, ServerConfig::default());
    }
}
