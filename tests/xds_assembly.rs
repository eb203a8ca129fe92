//! Integration tests for ingress resource assembly
//!
//! Exercise the public builders the way a control plane would: build the
//! connection manager and the route table separately and check that they
//! line up by name.

use envoy_types::pb::envoy::config::route::v3::VirtualHost;
use envoy_types::pb::envoy::extensions::filters::network::http_connection_manager::v3::{
    http_connection_manager::RouteSpecifier, HttpFilter,
};
use ingress_xds::xds::filters::http::{router_filter, ROUTER_FILTER_NAME};
use ingress_xds::xds::{
    compose_http_filters, new_http_connection_manager, new_route_config, BuiltResource,
    ExtAuthzConfig, ExternalAuthz, INITIAL_FETCH_TIMEOUT, STAT_PREFIX,
};
use proptest::prelude::*;

fn rds_route_name(authz: &ExternalAuthz, name: &str) -> String {
    let hcm = new_http_connection_manager(name, authz).expect("build connection manager");
    match hcm.route_specifier {
        Some(RouteSpecifier::Rds(rds)) => rds.route_config_name,
        other => panic!("expected RDS route specifier, got {:?}", other),
    }
}

#[test]
fn connection_manager_without_authz() {
    let hcm = new_http_connection_manager("my-routes", &ExternalAuthz::Disabled).unwrap();

    assert_eq!(hcm.stat_prefix, STAT_PREFIX);
    assert_eq!(hcm.http_filters.len(), 1);
    assert_eq!(hcm.http_filters[0].name, ROUTER_FILTER_NAME);

    let rds = match hcm.route_specifier {
        Some(RouteSpecifier::Rds(rds)) => rds,
        other => panic!("expected RDS route specifier, got {:?}", other),
    };
    assert_eq!(rds.route_config_name, "my-routes");
    let timeout = rds.config_source.and_then(|s| s.initial_fetch_timeout).unwrap();
    assert_eq!(timeout.seconds as u64, INITIAL_FETCH_TIMEOUT.as_secs());
    assert_eq!(timeout.nanos, 0);
}

#[test]
fn connection_manager_with_named_authz_filter() {
    let authz =
        ExternalAuthz::Enabled(HttpFilter { name: "authz".to_string(), ..Default::default() });
    let hcm = new_http_connection_manager("my-routes", &authz).unwrap();

    let names: Vec<&str> = hcm.http_filters.iter().map(|f| f.name.as_str()).collect();
    assert_eq!(names, vec!["authz", ROUTER_FILTER_NAME]);
}

#[test]
fn connection_manager_with_configured_ext_authz() {
    let settings = ExtAuthzConfig::new("authz.svc", 6000);
    let authz = ExternalAuthz::from_settings(Some(&settings)).unwrap();
    let hcm = new_http_connection_manager("my-routes", &authz).unwrap();

    assert_eq!(hcm.http_filters.len(), 2);
    assert_eq!(hcm.http_filters[0], *authz.http_filter().unwrap());
    assert_eq!(hcm.http_filters[1].name, ROUTER_FILTER_NAME);
}

#[test]
fn empty_route_table() {
    let route_config = new_route_config("my-routes", Vec::new());
    assert_eq!(route_config.name, "my-routes");
    assert!(route_config.virtual_hosts.is_empty());
}

#[test]
fn route_table_and_connection_manager_share_name() {
    let hcm = new_http_connection_manager("shared", &ExternalAuthz::Disabled).unwrap();
    let route_config = new_route_config("shared", Vec::new());

    let built = BuiltResource::route(&route_config).unwrap();
    match hcm.route_specifier {
        Some(RouteSpecifier::Rds(rds)) => assert_eq!(rds.route_config_name, built.name),
        other => panic!("expected RDS route specifier, got {:?}", other),
    }
}

#[test]
fn concurrent_builds_are_independent() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let name = format!("routes-{}", i);
                let authz = if i % 2 == 0 {
                    ExternalAuthz::Disabled
                } else {
                    ExternalAuthz::Enabled(HttpFilter {
                        name: "authz".to_string(),
                        ..Default::default()
                    })
                };
                (name.clone(), rds_route_name(&authz, &name), compose_http_filters(&authz).len())
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let (expected, actual, filter_count) = handle.join().unwrap();
        assert_eq!(expected, actual);
        assert_eq!(filter_count, if i % 2 == 0 { 1 } else { 2 });
    }
}

fn arb_authz() -> impl Strategy<Value = ExternalAuthz> {
    prop_oneof![
        Just(ExternalAuthz::Disabled),
        (
            prop_oneof![Just(ROUTER_FILTER_NAME.to_string()), "[a-z][a-z0-9_.]{0,24}"],
            any::<bool>(),
        )
            .prop_map(|(name, is_optional)| {
                ExternalAuthz::Enabled(HttpFilter { name, is_optional, ..Default::default() })
            }),
    ]
}

fn arb_virtual_host() -> impl Strategy<Value = VirtualHost> {
    ("[a-z]{1,12}", prop::collection::vec("[a-z]{1,8}\\.example\\.com", 0..4)).prop_map(
        |(name, domains)| VirtualHost { name, domains, ..Default::default() },
    )
}

proptest! {
    #[test]
    fn router_is_always_last(authz in arb_authz()) {
        let filters = compose_http_filters(&authz);

        prop_assert!(!filters.is_empty());
        prop_assert_eq!(filters.last(), Some(&router_filter()));

        match authz.http_filter() {
            Some(descriptor) => {
                prop_assert!(filters.len() >= 2);
                prop_assert_eq!(&filters[0], descriptor);
            }
            None => prop_assert_eq!(filters.len(), 1),
        }
    }

    #[test]
    fn route_config_name_is_referenced_verbatim(name in ".{0,40}", authz in arb_authz()) {
        prop_assert_eq!(rds_route_name(&authz, &name), name);
    }

    #[test]
    fn route_table_round_trips(
        name in "[a-z0-9-]{0,32}",
        hosts in prop::collection::vec(arb_virtual_host(), 0..6),
    ) {
        let route_config = new_route_config(name.clone(), hosts.clone());
        prop_assert_eq!(route_config.name, name);
        prop_assert_eq!(route_config.virtual_hosts, hosts);
    }
}
