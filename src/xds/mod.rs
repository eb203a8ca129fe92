//! Envoy xDS resource assembly
//!
//! Builds the resources an ADS-driven ingress listener needs:
//! - the HTTP connection manager with its filter chain, access log and
//!   RDS binding ([`connection_manager`])
//! - the named route table it binds to ([`route`])
//!
//! Delivery of these resources to the proxy is left to the caller; see
//! [`resources::BuiltResource`] for the packed form.

pub mod access_log;
pub mod connection_manager;
pub mod filters;
pub mod resources;
pub mod route;

pub use connection_manager::{new_http_connection_manager, INITIAL_FETCH_TIMEOUT, STAT_PREFIX};
pub use filters::http::{compose_http_filters, ExtAuthzConfig, ExternalAuthz, HttpFilterChain};
pub use resources::BuiltResource;
pub use route::new_route_config;

use envoy_types::pb::google::protobuf::Duration as ProtoDuration;

/// Convert a std duration into the protobuf representation
pub(crate) fn to_proto_duration(duration: std::time::Duration) -> ProtoDuration {
    ProtoDuration { seconds: duration.as_secs() as i64, nanos: duration.subsec_nanos() as i32 }
}
