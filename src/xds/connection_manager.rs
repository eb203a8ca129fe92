//! HTTP connection manager assembly
//!
//! Builds the per-listener `HttpConnectionManager`: the composed HTTP filter
//! chain, the stdout access log, and an RDS binding that asks the proxy to
//! fetch the named route table over ADS.

use envoy_types::pb::envoy::config::core::v3::{
    config_source::ConfigSourceSpecifier, AggregatedConfigSource, ApiVersion, ConfigSource,
};
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::{
    http_connection_manager::{CodecType, RouteSpecifier},
    HttpConnectionManager, Rds,
};
use std::time::Duration;
use tracing::debug;

use crate::xds::access_log::stdout_access_log;
use crate::xds::filters::http::{compose_http_filters, ExternalAuthz};
use crate::xds::to_proto_duration;
use crate::Result;

/// Metrics namespace of the ingress connection manager
pub const STAT_PREFIX: &str = "ingress_http";
/// Bound on the first route fetch after the proxy subscribes
pub const INITIAL_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Config source resolving resources over the aggregated discovery stream
pub fn ads_config_source() -> ConfigSource {
    ConfigSource {
        config_source_specifier: Some(ConfigSourceSpecifier::Ads(
            AggregatedConfigSource::default(),
        )),
        initial_fetch_timeout: Some(to_proto_duration(INITIAL_FETCH_TIMEOUT)),
        resource_api_version: ApiVersion::V3 as i32,
        ..Default::default()
    }
}

/// Create an `HttpConnectionManager` whose routes come from the route table
/// named `route_config_name`, delivered dynamically over ADS.
///
/// The name is used verbatim; it is not checked for emptiness. Fails only if
/// the access log payload cannot be encoded, in which case nothing is
/// returned.
pub fn new_http_connection_manager(
    route_config_name: &str,
    authz: &ExternalAuthz,
) -> Result<HttpConnectionManager> {
    let _span = crate::xds_span!("build_http_connection_manager", route_config_name).entered();

    let http_filters = compose_http_filters(authz);
    let access_log = vec![stdout_access_log()?];

    debug!(
        filter_count = http_filters.len(),
        ext_authz_enabled = authz.is_enabled(),
        "Assembled HTTP connection manager"
    );

    Ok(HttpConnectionManager {
        codec_type: CodecType::Auto as i32,
        stat_prefix: STAT_PREFIX.to_string(),
        http_filters,
        access_log,
        route_specifier: Some(RouteSpecifier::Rds(Rds {
            config_source: Some(ads_config_source()),
            route_config_name: route_config_name.to_string(),
        })),
        ..Default::default()
    })
}
