//! Injected collaborators abstracting external state.
//!
//! The reconciler never talks to a discovery backend or a secret store
//! directly; it is handed these trait objects and treats their errors as
//! leaf errors to bubble unmodified.

use std::collections::BTreeMap;

use async_trait::async_trait;
use strix_core::Result;
use strix_resources::UpstreamHost;

/// Resolves the live endpoints backing a cluster.
#[async_trait]
pub trait EndpointResolver: Send + Sync {
    /// The `(address, port)` pairs currently matching `selector` in
    /// `namespace`, serving on `target_port`.
    async fn resolve(
        &self,
        namespace: &str,
        cluster_name: &str,
        selector: &BTreeMap<String, String>,
        target_port: u32,
    ) -> Result<Vec<UpstreamHost>>;
}

/// Fetches stored key material by name.
#[async_trait]
pub trait SecretLookup: Send + Sync {
    /// The material stored under `name` in `namespace`.
    ///
    /// An absent secret is `Err(NotFound)`. A secret of the wrong kind is
    /// `Ok` with missing fields; the reconciler rejects it as a validation
    /// error, keeping the two failure modes distinct.
    async fn lookup(&self, namespace: &str, name: &str) -> Result<SecretMaterial>;
}

/// Key material returned by a [`SecretLookup`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SecretMaterial {
    /// PEM-encoded private key, when the stored secret carries one.
    pub private_key: Option<String>,
    /// PEM-encoded certificate chain, when the stored secret carries one.
    pub certificate_chain: Option<String>,
}

impl SecretMaterial {
    /// Whether the material is a usable TLS pair (both key and chain).
    #[must_use]
    pub fn is_tls(&self) -> bool {
        self.private_key.is_some() && self.certificate_chain.is_some()
    }
}
