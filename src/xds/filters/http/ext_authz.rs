//! External Authorization (ext_authz) HTTP filter configuration
//!
//! The ext_authz descriptor is built once from process configuration and then
//! treated as an opaque [`HttpFilter`]: the filter chain composer only decides
//! where it goes, never what it contains.

use crate::xds::filters::{encode_any, invalid_config};
use crate::xds::to_proto_duration;
use envoy_types::pb::envoy::config::core::v3::{grpc_service, GrpcService};
use envoy_types::pb::envoy::extensions::filters::http::ext_authz::v3::{
    ext_authz::Services, BufferSettings, ExtAuthz as ExtAuthzProto,
};
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::http_filter::ConfigType as HttpFilterConfigType;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpFilter;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;

/// Envoy's canonical ext_authz filter name
pub const EXT_AUTHZ_FILTER_NAME: &str = "envoy.filters.http.ext_authz";
pub const EXT_AUTHZ_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.http.ext_authz.v3.ExtAuthz";
/// Upstream cluster the authorization gRPC service is reached through
pub const EXT_AUTHZ_CLUSTER_NAME: &str = "extAuthz";

pub const DEFAULT_MAX_REQUEST_BYTES: u32 = 8192;
pub const DEFAULT_TIMEOUT_MS: u64 = 2000;

/// External authorization service settings.
///
/// `host` and `port` identify the authorization service for whatever builds
/// the `extAuthz` upstream cluster; the filter descriptor itself only names
/// that cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ExtAuthzConfig {
    /// Authorization service host
    #[validate(length(min = 1, message = "ext_authz host cannot be empty"))]
    pub host: String,

    /// Authorization service port
    #[validate(range(min = 1, message = "ext_authz port must be non-zero"))]
    pub port: u16,

    /// Let requests through when the authorization service is unavailable
    #[serde(default)]
    pub failure_mode_allow: bool,

    /// Maximum request body bytes buffered and sent to the service
    #[serde(default = "default_max_request_bytes")]
    pub max_request_bytes: u32,

    /// Timeout for each authorization call in milliseconds
    #[serde(default = "default_timeout_ms")]
    #[validate(range(min = 1, message = "ext_authz timeout must be at least 1ms"))]
    pub timeout_ms: u64,
}

fn default_max_request_bytes() -> u32 {
    DEFAULT_MAX_REQUEST_BYTES
}

fn default_timeout_ms() -> u64 {
    DEFAULT_TIMEOUT_MS
}

impl ExtAuthzConfig {
    /// Settings for the given service with default limits
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            failure_mode_allow: false,
            max_request_bytes: DEFAULT_MAX_REQUEST_BYTES,
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }

    /// Parse a `host:port` address into settings with default limits
    pub fn from_address(address: &str) -> Result<Self, crate::Error> {
        let (host, port) = address
            .rsplit_once(':')
            .ok_or_else(|| invalid_config(format!("ext_authz address '{}' has no port", address)))?;
        let port = port.parse::<u16>().map_err(|e| {
            invalid_config(format!("ext_authz address '{}' has invalid port: {}", address, e))
        })?;

        Ok(Self::new(host, port))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Build the ext_authz protobuf payload
    pub fn to_proto(&self) -> ExtAuthzProto {
        let grpc_service = GrpcService {
            target_specifier: Some(grpc_service::TargetSpecifier::EnvoyGrpc(
                grpc_service::EnvoyGrpc {
                    cluster_name: EXT_AUTHZ_CLUSTER_NAME.to_string(),
                    ..Default::default()
                },
            )),
            timeout: Some(to_proto_duration(self.timeout())),
            ..Default::default()
        };

        ExtAuthzProto {
            services: Some(Services::GrpcService(grpc_service)),
            failure_mode_allow: self.failure_mode_allow,
            with_request_body: Some(BufferSettings {
                max_request_bytes: self.max_request_bytes,
                allow_partial_message: true,
                ..Default::default()
            }),
            clear_route_cache: false,
            ..Default::default()
        }
    }

    /// Validate the settings and build the pre-configured HTTP filter
    pub fn to_http_filter(&self) -> Result<HttpFilter, crate::Error> {
        self.validate()?;

        let typed_config = encode_any(EXT_AUTHZ_TYPE_URL, &self.to_proto())?;

        Ok(HttpFilter {
            name: EXT_AUTHZ_FILTER_NAME.to_string(),
            is_optional: false,
            disabled: false,
            config_type: Some(HttpFilterConfigType::TypedConfig(typed_config)),
        })
    }
}

/// Process-wide external authorization state.
///
/// Loaded once at startup and passed explicitly to the connection manager
/// assembler. When enabled it carries the pre-built filter descriptor.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ExternalAuthz {
    #[default]
    Disabled,
    Enabled(HttpFilter),
}

impl ExternalAuthz {
    /// Derive the state from optional service settings
    pub fn from_settings(config: Option<&ExtAuthzConfig>) -> Result<Self, crate::Error> {
        match config {
            Some(config) => config.to_http_filter().map(Self::Enabled),
            None => Ok(Self::Disabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled(_))
    }

    /// The authorization filter descriptor, if enabled
    pub fn http_filter(&self) -> Option<&HttpFilter> {
        match self {
            Self::Enabled(filter) => Some(filter),
            Self::Disabled => None,
        }
    }
}
