//! Configuration loader

use config::{Config, Environment, File};
use std::path::Path;

use super::types::{AppConfig, AppSettings, GatewayConfig};
use crate::common::errors::{ClientError, Result};

/// Load configuration from file and environment variables
///
/// Priority (highest to lowest):
/// 1. Environment variables (`APP_` prefix, `__` between sections,
///    e.g. `APP_GATEWAY__BASE_URL`)
/// 2. Configuration file (TOML format)
/// 3. Default values
pub fn load_config(config_path: Option<&str>) -> Result<AppConfig> {
    let mut builder = Config::builder();

    if let Some(path) = config_path {
        if Path::new(path).exists() {
            builder = builder.add_source(File::with_name(path).required(false));
        }
    }

    builder = builder.add_source(
        Environment::with_prefix("APP")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder
        .build()
        .map_err(|e| ClientError::Configuration(e.to_string()))?;

    config
        .try_deserialize()
        .map_err(|e| ClientError::Configuration(e.to_string()))
}

/// Load configuration from environment variables only
pub fn load_from_env() -> Result<AppConfig> {
    // Try to load from .env file
    dotenvy::dotenv().ok();

    let defaults = GatewayConfig::default();
    let gateway = GatewayConfig {
        base_url: std::env::var("GATEWAY_BASE_URL").unwrap_or(defaults.base_url),
        connect_timeout_ms: parse_env("GATEWAY_CONNECT_TIMEOUT_MS")?
            .unwrap_or(defaults.connect_timeout_ms),
        request_timeout_seconds: parse_env("GATEWAY_REQUEST_TIMEOUT_SECONDS")?
            .unwrap_or(defaults.request_timeout_seconds),
    };

    let settings = AppSettings {
        log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| AppSettings::default().log_level),
    };

    Ok(AppConfig { gateway, settings })
}

fn parse_env(key: &str) -> Result<Option<u64>> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|e| ClientError::Configuration(format!("{}: {}", key, e))),
        Err(_) => Ok(None),
    }
}
