//! Version-specific resource generation.
//!
//! The generator produces empty decode targets and synthesizes derived
//! resources: TLS secrets from stored key material and endpoint
//! aggregations from discovered hosts.

use strix_core::{ApiVersion, ResourceType};

use crate::resource::Resource;
use crate::types::{
    CertificateValidationContext, Cluster, ClusterLoadAssignment, Listener, RouteConfiguration,
    Runtime, ScopedRouteConfiguration, Secret, TlsCertificate, TypedExtensionConfig, UpstreamHost,
    VirtualHost,
};

/// Factory for resource instances, polymorphic over the protocol version.
pub trait Generator: Send + Sync {
    /// A fresh, empty instance of the concrete schema for `rtype`.
    ///
    /// Dispatch is exhaustive over [`ResourceType`], so the "unknown type"
    /// defect of a stringly-typed registry is unrepresentable here.
    fn new_resource(&self, rtype: ResourceType) -> Resource;

    /// A Secret resource carrying a TLS key/certificate pair.
    fn tls_certificate_secret(
        &self,
        name: &str,
        private_key: &str,
        certificate_chain: &str,
    ) -> Resource;

    /// A Secret resource carrying a trusted-CA validation context.
    fn validation_context_secret(&self, name: &str, certificate_chain: &str) -> Resource;

    /// An Endpoint resource aggregating the given hosts.
    ///
    /// Hosts are sorted before serialization so that discovery order never
    /// affects the resulting content hash.
    fn cluster_load_assignment(&self, cluster_name: &str, hosts: Vec<UpstreamHost>) -> Resource;
}

/// Generator for the v3 API.
#[derive(Debug, Default, Clone, Copy)]
pub struct GeneratorV3;

impl Generator for GeneratorV3 {
    fn new_resource(&self, rtype: ResourceType) -> Resource {
        match rtype {
            ResourceType::Endpoint => Resource::Endpoint(ClusterLoadAssignment::default()),
            ResourceType::Cluster => Resource::Cluster(Cluster::default()),
            ResourceType::Route => Resource::Route(RouteConfiguration::default()),
            ResourceType::ScopedRoute => {
                Resource::ScopedRoute(ScopedRouteConfiguration::default())
            }
            ResourceType::VirtualHost => Resource::VirtualHost(VirtualHost::default()),
            ResourceType::Listener => Resource::Listener(Listener::default()),
            ResourceType::Secret => Resource::Secret(Secret::default()),
            ResourceType::Runtime => Resource::Runtime(Runtime::default()),
            ResourceType::ExtensionConfig => {
                Resource::ExtensionConfig(TypedExtensionConfig::default())
            }
        }
    }

    fn tls_certificate_secret(
        &self,
        name: &str,
        private_key: &str,
        certificate_chain: &str,
    ) -> Resource {
        Resource::Secret(Secret {
            name: name.to_string(),
            tls_certificate: Some(TlsCertificate {
                private_key: private_key.to_string(),
                certificate_chain: certificate_chain.to_string(),
            }),
            validation_context: None,
        })
    }

    fn validation_context_secret(&self, name: &str, certificate_chain: &str) -> Resource {
        Resource::Secret(Secret {
            name: name.to_string(),
            tls_certificate: None,
            validation_context: Some(CertificateValidationContext {
                trusted_ca: certificate_chain.to_string(),
            }),
        })
    }

    fn cluster_load_assignment(&self, cluster_name: &str, mut hosts: Vec<UpstreamHost>) -> Resource {
        hosts.sort_unstable();
        Resource::Endpoint(ClusterLoadAssignment {
            cluster_name: cluster_name.to_string(),
            endpoints: hosts,
        })
    }
}

/// Return the generator for the given API version.
#[must_use]
pub fn generator(version: ApiVersion) -> Box<dyn Generator> {
    match version {
        ApiVersion::V3 => Box::new(GeneratorV3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_resource_matches_kind() {
        let gen = generator(ApiVersion::V3);
        for rtype in ResourceType::ALL {
            assert_eq!(gen.new_resource(rtype).resource_type(), rtype);
        }
    }

    #[test]
    fn load_assignment_order_independent() {
        let gen = GeneratorV3;
        let a = gen.cluster_load_assignment(
            "foo",
            vec![
                UpstreamHost::new("10.0.0.2", 8080),
                UpstreamHost::new("10.0.0.1", 8080),
            ],
        );
        let b = gen.cluster_load_assignment(
            "foo",
            vec![
                UpstreamHost::new("10.0.0.1", 8080),
                UpstreamHost::new("10.0.0.2", 8080),
            ],
        );
        assert_eq!(a.canonical_json().unwrap(), b.canonical_json().unwrap());
    }

    #[test]
    fn secret_blueprints() {
        let gen = GeneratorV3;
        let cert = gen.tls_certificate_secret("server", "KEY", "CHAIN");
        match &cert {
            Resource::Secret(s) => {
                assert!(s.tls_certificate.is_some());
                assert!(s.validation_context.is_none());
            }
            other => panic!("expected secret, got {other:?}"),
        }

        let ctx = gen.validation_context_secret("ca", "CHAIN");
        match &ctx {
            Resource::Secret(s) => {
                assert!(s.tls_certificate.is_none());
                assert_eq!(
                    s.validation_context.as_ref().unwrap().trusted_ca,
                    "CHAIN"
                );
            }
            other => panic!("expected secret, got {other:?}"),
        }
    }
}
