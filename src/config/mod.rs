//! # Configuration Management
//!
//! Process-wide settings, read once from the environment at startup. The
//! external authorization settings produce the [`ExternalAuthz`] state that
//! is passed explicitly into connection manager assembly.

use crate::xds::filters::http::{ExtAuthzConfig, ExternalAuthz};
use crate::Result;
use serde::{Deserialize, Serialize};

pub const EXTAUTHZ_HOST_ENV: &str = "INGRESS_EXTAUTHZ_HOST";
pub const EXTAUTHZ_FAILURE_MODE_ALLOW_ENV: &str = "INGRESS_EXTAUTHZ_FAILUREMODEALLOW";
pub const EXTAUTHZ_MAX_REQUEST_BYTES_ENV: &str = "INGRESS_EXTAUTHZ_MAXREQUESTBYTES";
pub const EXTAUTHZ_TIMEOUT_ENV: &str = "INGRESS_EXTAUTHZ_TIMEOUT";
pub const LOG_LEVEL_ENV: &str = "INGRESS_LOG_LEVEL";
pub const RUST_LOG_ENV: &str = "RUST_LOG";
pub const LOG_JSON_ENV: &str = "INGRESS_LOG_JSON";

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// External authorization service, `None` when disabled
    pub ext_authz: Option<ExtAuthzConfig>,
    pub observability: ObservabilityConfig,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log filter directive (trace, debug, info, warn, error)
    pub log_level: String,
    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logging: false }
    }
}

impl ObservabilityConfig {
    /// Raise the level to `debug`, replacing any configured directive
    pub fn verbose(self) -> Self {
        Self { log_level: "debug".to_string(), ..self }
    }
}

impl Config {
    /// Create configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let ext_authz = match lookup(EXTAUTHZ_HOST_ENV).filter(|host| !host.is_empty()) {
            Some(address) => {
                let mut config = ExtAuthzConfig::from_address(&address)?;
                if let Some(value) = lookup(EXTAUTHZ_FAILURE_MODE_ALLOW_ENV) {
                    config.failure_mode_allow =
                        parse_bool(EXTAUTHZ_FAILURE_MODE_ALLOW_ENV, &value)?;
                }
                if let Some(value) = lookup(EXTAUTHZ_MAX_REQUEST_BYTES_ENV) {
                    config.max_request_bytes = value.parse().map_err(|e| {
                        crate::Error::config(format!(
                            "Invalid {}: {}",
                            EXTAUTHZ_MAX_REQUEST_BYTES_ENV, e
                        ))
                    })?;
                }
                if let Some(value) = lookup(EXTAUTHZ_TIMEOUT_ENV) {
                    config.timeout_ms = value.parse().map_err(|e| {
                        crate::Error::config(format!("Invalid {}: {}", EXTAUTHZ_TIMEOUT_ENV, e))
                    })?;
                }
                Some(config)
            }
            None => None,
        };

        let observability = ObservabilityConfig {
            log_level: lookup(LOG_LEVEL_ENV)
                .or_else(|| lookup(RUST_LOG_ENV))
                .unwrap_or_else(|| "info".to_string()),
            json_logging: match lookup(LOG_JSON_ENV) {
                Some(value) => parse_bool(LOG_JSON_ENV, &value)?,
                None => false,
            },
        };

        Ok(Self { ext_authz, observability })
    }

    /// Build the external authorization state, pre-building its filter
    pub fn external_authz(&self) -> Result<ExternalAuthz> {
        ExternalAuthz::from_settings(self.ext_authz.as_ref())
    }
}

fn parse_bool(key: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Ok(true),
        "0" | "f" | "false" => Ok(false),
        other => {
            Err(crate::Error::config(format!("Invalid {}: '{}' is not a boolean", key, other)))
        }
    }
}
