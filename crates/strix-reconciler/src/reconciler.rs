//! The reconciliation algorithm.

use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use strix_cache::Cache;
use strix_core::{
    ApiVersion, NodeId, ResourceType, Result, StrixError, VersionTracker, RESOURCE_TYPE_COUNT,
};
use strix_resources::{
    generator, unmarshaller, Generator, Resource, ResourceUnmarshaller, Serialization,
};

use crate::definition::{Blueprint, ResourceDefinition};
use crate::discovery::{EndpointResolver, SecretLookup};

/// Builds a node's snapshot from its definition list and writes it through
/// to the cache only when a per-type version actually changed.
///
/// A reconciliation is all-or-nothing: any leaf error aborts the whole call
/// and leaves the previously cached snapshot untouched.
pub struct CacheReconciler {
    cache: Arc<dyn Cache>,
    generator: Box<dyn Generator>,
    decoder: Box<dyn ResourceUnmarshaller>,
    resolver: Arc<dyn EndpointResolver>,
    secrets: Arc<dyn SecretLookup>,
}

impl CacheReconciler {
    /// Create a reconciler for raw values in `encoding`, generating
    /// resources for `version`.
    #[must_use]
    pub fn new(
        cache: Arc<dyn Cache>,
        encoding: Serialization,
        version: ApiVersion,
        resolver: Arc<dyn EndpointResolver>,
        secrets: Arc<dyn SecretLookup>,
    ) -> Self {
        Self {
            cache,
            generator: generator(version),
            decoder: unmarshaller(encoding, version),
            resolver,
            secrets,
        }
    }

    /// Reconcile `node`'s declared configuration.
    ///
    /// Processes `definitions` in list order, buckets the produced
    /// resources by type, builds a fresh snapshot, and installs it only if
    /// any per-type version differs from the cached one. `version_label` is
    /// a human-readable tag used in logs only.
    ///
    /// Returns the per-type versions of the (possibly just-written)
    /// snapshot for status reporting.
    pub async fn reconcile(
        &self,
        node: &NodeId,
        namespace: &str,
        definitions: &[ResourceDefinition],
        version_label: &str,
        token: &CancellationToken,
    ) -> Result<VersionTracker> {
        let mut buckets: [Vec<Resource>; RESOURCE_TYPE_COUNT] =
            std::array::from_fn(|_| Vec::new());

        for (idx, definition) in definitions.iter().enumerate() {
            match definition {
                ResourceDefinition::FromEndpointDiscovery {
                    cluster_name,
                    target_port,
                    selector,
                } => {
                    let hosts = cancellable(
                        token,
                        "endpoint discovery",
                        self.resolver
                            .resolve(namespace, cluster_name, selector, *target_port),
                    )
                    .await?;
                    buckets[ResourceType::Endpoint.index()]
                        .push(self.generator.cluster_load_assignment(cluster_name, hosts));
                }

                ResourceDefinition::Raw {
                    resource_type,
                    value,
                } => {
                    // Secrets are only ever derived from stored material,
                    // never declared inline; an inline one is ignored.
                    if *resource_type == ResourceType::Secret {
                        debug!(index = idx, "skipping inline secret definition");
                        continue;
                    }
                    let resource =
                        self.decoder.unmarshal(value, *resource_type).map_err(|e| {
                            StrixError::validation(
                                format!("resources[{idx}].value"),
                                value.clone(),
                                format!("invalid resource value: '{e}'"),
                            )
                        })?;
                    buckets[resource_type.index()].push(resource);
                }

                ResourceDefinition::FromSecret { name, blueprint } => {
                    let material =
                        cancellable(token, "secret lookup", self.secrets.lookup(namespace, name))
                            .await?;
                    let (Some(key), Some(chain)) =
                        (&material.private_key, &material.certificate_chain)
                    else {
                        return Err(StrixError::validation(
                            format!("resources[{idx}].ref"),
                            name.clone(),
                            format!("secret '{name}' does not carry a TLS key/certificate pair"),
                        ));
                    };
                    let resource = match blueprint {
                        Blueprint::TlsCertificate => {
                            self.generator.tls_certificate_secret(name, key, chain)
                        }
                        Blueprint::TlsValidationContext => {
                            self.generator.validation_context_secret(name, chain)
                        }
                    };
                    buckets[ResourceType::Secret.index()].push(resource);
                }
            }
        }

        let mut snapshot = self.cache.new_snapshot();
        for (rtype, bucket) in ResourceType::ALL.into_iter().zip(buckets) {
            snapshot.set_resources(rtype, bucket)?;
        }

        let changed = match self.cache.get_snapshot(node) {
            Ok(previous) => snapshot.differs_from(&previous),
            Err(e) if e.is_not_found() => true,
            Err(e) => return Err(e),
        };

        let tracker = snapshot.version_tracker();

        if changed {
            info!(
                node = %node,
                version = version_label,
                resources = snapshot.total_resources(),
                "writing updated snapshot"
            );
            cancellable(token, "cache write", self.cache.set_snapshot(node, snapshot)).await?;
        } else {
            debug!(node = %node, version = version_label, "snapshot unchanged, skipping write");
        }

        Ok(tracker)
    }
}

/// Race `fut` against the token; cancellation wins ties so a cancelled
/// reconciliation stops at the next external call.
async fn cancellable<T>(
    token: &CancellationToken,
    operation: &str,
    fut: impl Future<Output = Result<T>>,
) -> Result<T> {
    tokio::select! {
        biased;
        () = token.cancelled() => Err(StrixError::Cancelled {
            operation: operation.to_string(),
        }),
        result = fut => result,
    }
}
