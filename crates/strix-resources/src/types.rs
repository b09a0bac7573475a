//! Concrete schemas for every resource kind.
//!
//! These are the protocol-facing shapes declarative definitions decode
//! into. Unknown fields are rejected so that a typo in an authored value
//! surfaces as a decode error instead of silently dropping configuration.

use serde::{Deserialize, Serialize};

/// A network address as `(host, port)`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Address {
    /// Host name or IP literal.
    pub address: String,
    /// Port number.
    pub port: u32,
}

/// A single upstream host inside a load assignment.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamHost {
    /// Host name or IP literal.
    pub address: String,
    /// Port number.
    pub port: u32,
}

impl UpstreamHost {
    /// Create an upstream host.
    #[must_use]
    pub fn new(address: impl Into<String>, port: u32) -> Self {
        Self {
            address: address.into(),
            port,
        }
    }
}

/// Aggregated endpoint list for one cluster (EDS).
///
/// Named by `cluster_name`; clusters reference it through their
/// `eds_service_name`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClusterLoadAssignment {
    /// Cluster this assignment belongs to; doubles as the resource name.
    pub cluster_name: String,
    /// Member hosts.
    #[serde(default)]
    pub endpoints: Vec<UpstreamHost>,
}

/// An upstream cluster (CDS).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cluster {
    /// Cluster name.
    pub name: String,
    /// Connection timeout in milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connect_timeout_ms: Option<u64>,
    /// Load balancing policy identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lb_policy: Option<String>,
    /// Name of the endpoint assignment serving this cluster. When set, a
    /// consistent snapshot must contain an Endpoint resource of that name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eds_service_name: Option<String>,
}

impl Cluster {
    /// The endpoint-assignment name this cluster references, if any.
    #[must_use]
    pub fn endpoint_reference(&self) -> Option<&str> {
        self.eds_service_name.as_deref()
    }
}

/// A routing rule inside a virtual host.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteRule {
    /// Path prefix this rule matches.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    /// Cluster traffic is forwarded to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cluster: Option<String>,
}

/// A virtual host (VHDS, also nested inside route configurations).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VirtualHost {
    /// Virtual host name.
    pub name: String,
    /// Domains this virtual host serves.
    #[serde(default)]
    pub domains: Vec<String>,
    /// Routing rules, evaluated in order.
    #[serde(default)]
    pub routes: Vec<RouteRule>,
}

/// A route configuration (RDS).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RouteConfiguration {
    /// Route configuration name; listeners reference it by this name.
    pub name: String,
    /// Virtual hosts served under this configuration.
    #[serde(default)]
    pub virtual_hosts: Vec<VirtualHost>,
}

/// A scoped route configuration (SRDS).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ScopedRouteConfiguration {
    /// Scoped route name.
    pub name: String,
    /// Route configuration selected when the scope key matches.
    pub route_configuration_name: String,
    /// Key fragments selecting this scope.
    #[serde(default)]
    pub key: Vec<String>,
}

/// One filter chain of a listener.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FilterChain {
    /// Route configuration consumed by this chain. When set, a consistent
    /// snapshot must contain a Route resource of that name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_config_name: Option<String>,
    /// TLS secret presented on this chain, if terminating TLS.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_secret_name: Option<String>,
}

/// A listener (LDS).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Listener {
    /// Listener name.
    pub name: String,
    /// Bind address.
    #[serde(default)]
    pub address: Address,
    /// Filter chains, matched in order.
    #[serde(default)]
    pub filter_chains: Vec<FilterChain>,
}

impl Listener {
    /// Route configuration names referenced by this listener.
    pub fn route_references(&self) -> impl Iterator<Item = &str> {
        self.filter_chains
            .iter()
            .filter_map(|chain| chain.route_config_name.as_deref())
    }
}

/// A TLS key/certificate pair.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TlsCertificate {
    /// PEM-encoded private key.
    pub private_key: String,
    /// PEM-encoded certificate chain.
    pub certificate_chain: String,
}

/// A trusted-CA validation context.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CertificateValidationContext {
    /// PEM-encoded trusted CA chain.
    pub trusted_ca: String,
}

/// A TLS secret (SDS). Carries either a certificate pair or a validation
/// context, depending on the blueprint it was synthesized from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Secret {
    /// Secret name.
    pub name: String,
    /// Key/certificate pair, for `TlsCertificate` blueprints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tls_certificate: Option<TlsCertificate>,
    /// Trusted-CA context, for `TlsValidationContext` blueprints.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_context: Option<CertificateValidationContext>,
}

/// A runtime layer (RTDS).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Runtime {
    /// Runtime layer name.
    pub name: String,
    /// Opaque layer contents.
    #[serde(default)]
    pub layer: serde_json::Value,
}

/// A typed extension config (ECDS).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TypedExtensionConfig {
    /// Extension config name.
    pub name: String,
    /// Opaque typed configuration.
    #[serde(default)]
    pub typed_config: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_fields_are_rejected() {
        let result: Result<Cluster, _> =
            serde_json::from_str(r#"{"name":"foo","lbPolicy":"ROUND_ROBIN"}"#);
        assert!(result.is_err(), "camelCase alias should not be accepted");

        let result: Result<Cluster, _> =
            serde_json::from_str(r#"{"name":"foo","lb_policy":"ROUND_ROBIN"}"#);
        assert!(result.is_ok());
    }

    #[test]
    fn missing_name_is_a_decode_error() {
        let result: Result<Listener, _> = serde_json::from_str(r#"{"address":{}}"#);
        assert!(result.is_err());
    }

    #[test]
    fn listener_route_references() {
        let listener = Listener {
            name: "https".to_string(),
            address: Address {
                address: "0.0.0.0".to_string(),
                port: 8443,
            },
            filter_chains: vec![
                FilterChain {
                    route_config_name: Some("api-routes".to_string()),
                    tls_secret_name: None,
                },
                FilterChain::default(),
            ],
        };
        let refs: Vec<_> = listener.route_references().collect();
        assert_eq!(refs, vec!["api-routes"]);
    }
}
