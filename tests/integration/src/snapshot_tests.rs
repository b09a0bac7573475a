//! Snapshot and core-type integration tests.

use strix_xds::prelude::*;
use strix_xds::resources::{Cluster, ClusterLoadAssignment, RouteConfiguration};

fn cluster(name: &str) -> Resource {
    Resource::Cluster(Cluster {
        name: name.to_string(),
        ..Cluster::default()
    })
}

#[test]
fn new_snapshot_is_empty() {
    let snapshot = Snapshot::new();

    assert!(snapshot.is_empty());
    assert_eq!(snapshot.total_resources(), 0);
    for rtype in ResourceType::ALL {
        assert!(snapshot.version(rtype).is_empty());
    }
}

#[test]
fn versions_are_order_independent_across_types() {
    let mut a = Snapshot::new();
    a.set_resources(ResourceType::Cluster, vec![cluster("x"), cluster("y")])
        .unwrap();
    a.set_resources(
        ResourceType::Route,
        vec![Resource::Route(RouteConfiguration {
            name: "r1".to_string(),
            virtual_hosts: vec![],
        })],
    )
    .unwrap();

    let mut b = Snapshot::new();
    b.set_resources(
        ResourceType::Route,
        vec![Resource::Route(RouteConfiguration {
            name: "r1".to_string(),
            virtual_hosts: vec![],
        })],
    )
    .unwrap();
    b.set_resources(ResourceType::Cluster, vec![cluster("y"), cluster("x")])
        .unwrap();

    assert!(!a.differs_from(&b));
    assert_eq!(a.version_tracker(), b.version_tracker());
}

#[test]
fn consistency_error_names_the_missing_reference() {
    let mut snapshot = Snapshot::new();
    snapshot
        .set_resources(
            ResourceType::Cluster,
            vec![Resource::Cluster(Cluster {
                name: "backend".to_string(),
                eds_service_name: Some("backend-eds".to_string()),
                ..Cluster::default()
            })],
        )
        .unwrap();

    let err = snapshot.consistent().unwrap_err();
    assert_eq!(err.reason(), ErrorReason::Validation);
    assert!(err.to_string().contains("backend-eds"));

    snapshot
        .set_resources(
            ResourceType::Endpoint,
            vec![Resource::Endpoint(ClusterLoadAssignment {
                cluster_name: "backend-eds".to_string(),
                endpoints: vec![UpstreamHost::new("10.0.0.1", 8080)],
            })],
        )
        .unwrap();
    assert!(snapshot.consistent().is_ok());
}

#[test]
fn type_urls_are_stable() {
    assert_eq!(
        TypeUrl::of(ResourceType::Cluster, ApiVersion::V3).as_str(),
        "type.googleapis.com/envoy.config.cluster.v3.Cluster"
    );
    assert_eq!(
        TypeUrl::of(ResourceType::Endpoint, ApiVersion::V3).as_str(),
        "type.googleapis.com/envoy.config.endpoint.v3.ClusterLoadAssignment"
    );
    assert_eq!(
        TypeUrl::of(ResourceType::Secret, ApiVersion::V3).as_str(),
        "type.googleapis.com/envoy.extensions.transport_sockets.tls.v3.Secret"
    );
}

#[test]
fn registry_round_trips_every_type() {
    let registry = ResourceTypeRegistry::new(ApiVersion::V3);

    for rtype in ResourceType::ALL {
        let info = registry.get_by_type(rtype);
        assert_eq!(info.resource_type, rtype);
        let back = registry.get(info.type_url.as_str()).unwrap();
        assert_eq!(back.resource_type, rtype);
    }

    assert!(registry.get("type.googleapis.com/unknown.Kind").is_none());
    assert!(registry.validate("type.googleapis.com/unknown.Kind").is_err());
}

#[test]
fn serializer_round_trips_through_the_public_api() {
    let resource = cluster("backend");
    for encoding in [
        Serialization::Json,
        Serialization::Yaml,
        Serialization::B64Json,
    ] {
        let enc = marshaller(encoding, ApiVersion::V3);
        let dec = unmarshaller(encoding, ApiVersion::V3);
        let text = enc.marshal(&resource).unwrap();
        let back = dec.unmarshal(&text, ResourceType::Cluster).unwrap();
        assert_eq!(back, resource);
    }
}

#[test]
fn foreign_errors_classify_as_unknown() {
    let io_err = std::io::Error::other("disk gone");
    assert_eq!(reason_for_error(&io_err), ErrorReason::Unknown);

    let strix_err = StrixError::not_found("snapshot", "node-1");
    assert_eq!(reason_for_error(&strix_err), ErrorReason::NotFound);
}
