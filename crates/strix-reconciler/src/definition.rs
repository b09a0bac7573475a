//! The declarative input model.
//!
//! A node's desired configuration is an ordered list of
//! [`ResourceDefinition`]s supplied by an external loader (CRD, file, API).
//! Each definition either carries a serialized resource verbatim or
//! describes how to derive one from external state.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strix_core::ResourceType;

/// One declared item in a node's configuration.
///
/// # Example
///
/// ```rust
/// use strix_reconciler::ResourceDefinition;
///
/// let yaml = r#"
/// - raw:
///     type: cluster
///     value: '{"name": "backend"}'
/// - fromSecret:
///     name: server-cert
/// "#;
/// let defs: Vec<ResourceDefinition> = serde_yaml::from_str(yaml).unwrap();
/// assert_eq!(defs.len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ResourceDefinition {
    /// A serialized resource value, decoded as-is.
    #[serde(rename_all = "camelCase")]
    Raw {
        /// The resource kind the value decodes into.
        #[serde(rename = "type")]
        resource_type: ResourceType,
        /// The serialized resource in the configured encoding.
        value: String,
    },

    /// An Endpoint resource synthesized from live endpoint discovery.
    #[serde(rename_all = "camelCase")]
    FromEndpointDiscovery {
        /// Name of the cluster the assignment belongs to.
        cluster_name: String,
        /// Port the discovered hosts serve traffic on.
        target_port: u32,
        /// Label selector handed to the discovery backend.
        selector: BTreeMap<String, String>,
    },

    /// A Secret resource synthesized from stored key material.
    #[serde(rename_all = "camelCase")]
    FromSecret {
        /// Name of the stored secret.
        name: String,
        /// Which derived secret shape to synthesize.
        #[serde(default)]
        blueprint: Blueprint,
    },
}

/// Which derived Secret resource shape to synthesize from key material.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Blueprint {
    /// A TLS server certificate (key + chain).
    #[default]
    TlsCertificate,
    /// A validation context trusting the chain as a CA.
    TlsValidationContext,
}
