//! # Structured Logging
//!
//! Logging setup on top of the tracing ecosystem, plus the span macro used
//! around resource assembly.

use tracing_subscriber::{fmt, EnvFilter};

use crate::config::ObservabilityConfig;
use crate::Result;

/// Create a tracing span for an xDS resource build
#[macro_export]
macro_rules! xds_span {
    ($operation:expr, $resource:expr) => {
        tracing::debug_span!(
            "xds_build",
            operation = %$operation,
            resource = %$resource
        )
    };
    ($operation:expr, $resource:expr, $($field:tt)*) => {
        tracing::debug_span!(
            "xds_build",
            operation = %$operation,
            resource = %$resource,
            $($field)*
        )
    };
}

/// Install the global tracing subscriber.
///
/// The filter comes from the configured level only; the environment has
/// already been folded into it by [`crate::Config::from_env`]. Installing
/// twice is not an error; the first subscriber stays in place.
pub fn init_logging(config: &ObservabilityConfig) -> Result<()> {
    let filter = env_filter(config)?;

    let installed = if config.json_logging {
        tracing::subscriber::set_global_default(
            fmt().json().with_current_span(true).with_env_filter(filter).finish(),
        )
    } else {
        tracing::subscriber::set_global_default(fmt().with_env_filter(filter).finish())
    };

    if installed.is_err() {
        tracing::debug!("Global subscriber already installed; keeping it");
    }
    Ok(())
}

/// Build the level filter for the configured directive
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter> {
    EnvFilter::try_new(&config.log_level)
        .map_err(|e| crate::Error::config(format!("Invalid log level: {}", e)))
}

/// Log configuration at startup
pub fn log_config_info(config: &crate::config::Config) {
    tracing::info!(
        ext_authz_enabled = config.ext_authz.is_some(),
        ext_authz_host = config.ext_authz.as_ref().map(|c| c.host.as_str()).unwrap_or(""),
        json_logging = config.observability.json_logging,
        "Ingress xDS configuration"
    );
}
