//! HTTP filter chain composition
//!
//! The connection manager runs its HTTP filters in list order and hands the
//! request to the terminal router filter. Optional filters (currently only
//! external authorization) are placed ahead of the router, verbatim and
//! without inspection; the router is always appended as the final entry.

pub mod ext_authz;

pub use ext_authz::{ExtAuthzConfig, ExternalAuthz};

use crate::xds::filters::any_from_message;
use envoy_types::pb::envoy::extensions::filters::http::router::v3::Router as RouterFilter;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::http_filter::ConfigType as HttpFilterConfigType;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpFilter;
use tracing::debug;

/// Envoy's canonical router filter name
pub const ROUTER_FILTER_NAME: &str = "envoy.filters.http.router";
pub const ROUTER_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.http.router.v3.Router";

/// Ordered builder for an HTTP filter chain.
///
/// Filters run in the order they are added and are kept exactly as given.
/// [`HttpFilterChain::build`] always appends the router, so the last entry is
/// the router no matter how many optional filters precede it.
#[derive(Debug, Clone, Default)]
pub struct HttpFilterChain {
    filters: Vec<HttpFilter>,
}

impl HttpFilterChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter ahead of the router
    pub fn with_filter(mut self, filter: HttpFilter) -> Self {
        self.filters.push(filter);
        self
    }

    /// Append a filter only when one is supplied
    pub fn with_optional(self, filter: Option<HttpFilter>) -> Self {
        match filter {
            Some(filter) => self.with_filter(filter),
            None => self,
        }
    }

    /// Finish the chain with the terminal router filter
    pub fn build(self) -> Vec<HttpFilter> {
        let mut filters = self.filters;
        debug!(optional_filters = filters.len(), "Appending terminal router filter");
        filters.push(router_filter());
        filters
    }
}

/// Compose the HTTP filters for a connection manager.
///
/// With external authorization enabled its descriptor comes first; the
/// router always comes last. With it disabled the chain is just the router.
pub fn compose_http_filters(authz: &ExternalAuthz) -> Vec<HttpFilter> {
    HttpFilterChain::new().with_optional(authz.http_filter().cloned()).build()
}

/// The terminal router filter with an empty `Router` payload
pub fn router_filter() -> HttpFilter {
    HttpFilter {
        name: ROUTER_FILTER_NAME.to_string(),
        is_optional: false,
        disabled: false,
        config_type: Some(HttpFilterConfigType::TypedConfig(any_from_message(
            ROUTER_TYPE_URL,
            &RouterFilter::default(),
        ))),
    }
}
