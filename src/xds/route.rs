//! Route table construction
//!
//! A route table is referenced by name from the connection manager's RDS
//! binding. Rebuilding it under the same name supersedes the previous version
//! at the proxy.

use envoy_types::pb::envoy::config::route::v3::{RouteConfiguration, VirtualHost};

/// Create a `RouteConfiguration` with the given name and virtual hosts.
///
/// The virtual hosts are kept verbatim: no validation, reordering or
/// deduplication. An empty list yields a table that matches no requests.
pub fn new_route_config(
    name: impl Into<String>,
    virtual_hosts: Vec<VirtualHost>,
) -> RouteConfiguration {
    RouteConfiguration { name: name.into(), virtual_hosts, ..Default::default() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use envoy_types::pb::envoy::config::route::v3::{
        route::Action, route_action::ClusterSpecifier, route_match::PathSpecifier, Route,
        RouteAction, RouteMatch,
    };

    fn virtual_host(name: &str, domain: &str, cluster: &str) -> VirtualHost {
        VirtualHost {
            name: name.to_string(),
            domains: vec![domain.to_string()],
            routes: vec![Route {
                r#match: Some(RouteMatch {
                    path_specifier: Some(PathSpecifier::Prefix("/".to_string())),
                    ..Default::default()
                }),
                action: Some(Action::Route(RouteAction {
                    cluster_specifier: Some(ClusterSpecifier::Cluster(cluster.to_string())),
                    ..Default::default()
                })),
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_route_config() {
        let route_config = new_route_config("my-routes", Vec::new());
        assert_eq!(route_config.name, "my-routes");
        assert!(route_config.virtual_hosts.is_empty());
    }

    #[test]
    fn test_virtual_hosts_kept_verbatim() {
        let hosts = vec![
            virtual_host("b", "b.example.com", "cluster-b"),
            virtual_host("a", "a.example.com", "cluster-a"),
            // Same domain twice stays twice
            virtual_host("a", "a.example.com", "cluster-a"),
        ];

        let route_config = new_route_config("my-routes", hosts.clone());
        assert_eq!(route_config.name, "my-routes");
        assert_eq!(route_config.virtual_hosts, hosts);
    }
}
