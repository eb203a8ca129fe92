//! Resource packaging
//!
//! Packs built resources as `Any` payloads keyed by name, the form the
//! discovery transport serves.

use envoy_types::pb::envoy::config::route::v3::RouteConfiguration;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::HttpConnectionManager;
use envoy_types::pb::google::protobuf::Any;

use crate::xds::filters::encode_any;
use crate::Result;

pub const ROUTE_TYPE_URL: &str = "type.googleapis.com/envoy.config.route.v3.RouteConfiguration";
pub const HTTP_CONNECTION_MANAGER_TYPE_URL: &str =
    "type.googleapis.com/envoy.extensions.filters.network.http_connection_manager.v3.HttpConnectionManager";

/// Wrapper for a built Envoy resource along with its name.
///
/// This is the shape handed to the discovery transport, which keys resources
/// by `name`.
#[derive(Clone, Debug, PartialEq)]
pub struct BuiltResource {
    pub name: String,
    pub resource: Any,
}

impl BuiltResource {
    /// Pack a route table under its own name
    pub fn route(route_config: &RouteConfiguration) -> Result<Self> {
        Ok(Self {
            name: route_config.name.clone(),
            resource: encode_any(ROUTE_TYPE_URL, route_config)?,
        })
    }

    /// Pack a connection manager as the typed config of the named listener filter
    pub fn http_connection_manager(
        name: impl Into<String>,
        hcm: &HttpConnectionManager,
    ) -> Result<Self> {
        Ok(Self { name: name.into(), resource: encode_any(HTTP_CONNECTION_MANAGER_TYPE_URL, hcm)? })
    }

    pub fn into_any(self) -> Any {
        self.resource
    }

    pub fn type_url(&self) -> &str {
        &self.resource.type_url
    }

    /// Size of the encoded resource payload in bytes
    pub fn encoded_len(&self) -> usize {
        self.resource.value.len()
    }
}
