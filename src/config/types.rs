//! Configuration types

use serde::{Deserialize, Serialize};

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Trading gateway connection settings
    #[serde(default)]
    pub gateway: GatewayConfig,
    /// General application settings
    #[serde(default)]
    pub settings: AppSettings,
}

/// Trading gateway configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Base URL of the gateway REST API
    #[serde(default = "default_gateway_base_url")]
    pub base_url: String,
    /// TCP connect timeout in milliseconds
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,
    /// Total request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            base_url: default_gateway_base_url(),
            connect_timeout_ms: default_connect_timeout_ms(),
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_gateway_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_connect_timeout_ms() -> u64 {
    3050
}

fn default_request_timeout() -> u64 {
    10
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}
