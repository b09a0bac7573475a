//! File-driven control plane demo.
//!
//! Reads a scenario file describing a node's declared resources together
//! with static endpoint and secret fixtures, runs one reconciliation, and
//! prints the resulting per-type versions. Re-running with an unchanged
//! scenario demonstrates the write-skipping optimization.
//!
//! ## Running
//!
//! ```bash
//! cargo run -p file-control-plane -- --file demos/file-control-plane/scenario.yaml
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use async_trait::async_trait;
use clap::Parser;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;
use tracing::info;
use tracing_subscriber::EnvFilter;

use strix_xds::prelude::*;

#[derive(Parser)]
#[command(about = "Reconcile a node's snapshot from a YAML scenario file")]
struct Args {
    /// Path to the scenario file.
    #[arg(long, default_value = "scenario.yaml")]
    file: PathBuf,

    /// Run the reconciliation twice to show the unchanged-input no-op.
    #[arg(long)]
    twice: bool,
}

/// One node's declared configuration plus the external state the
/// collaborators would normally fetch live.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct Scenario {
    node_id: String,
    #[serde(default = "default_namespace")]
    namespace: String,
    #[serde(default = "default_label")]
    version_label: String,
    resources: Vec<ResourceDefinition>,
    #[serde(default)]
    endpoints: BTreeMap<String, Vec<HostEntry>>,
    #[serde(default)]
    secrets: BTreeMap<String, SecretEntry>,
}

fn default_namespace() -> String {
    "default".to_string()
}

fn default_label() -> String {
    "rev-1".to_string()
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
struct HostEntry {
    address: String,
    port: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
struct SecretEntry {
    private_key: Option<String>,
    certificate_chain: Option<String>,
}

/// Resolver backed by the scenario's `endpoints` fixture.
struct FixtureResolver(BTreeMap<String, Vec<HostEntry>>);

#[async_trait]
impl EndpointResolver for FixtureResolver {
    async fn resolve(
        &self,
        _namespace: &str,
        cluster_name: &str,
        _selector: &BTreeMap<String, String>,
        _target_port: u32,
    ) -> Result<Vec<UpstreamHost>, StrixError> {
        let hosts = self.0.get(cluster_name).ok_or_else(|| {
            StrixError::discovery(cluster_name, "no endpoints fixture in scenario file")
        })?;
        Ok(hosts
            .iter()
            .map(|h| UpstreamHost::new(h.address.clone(), h.port))
            .collect())
    }
}

/// Secret store backed by the scenario's `secrets` fixture.
struct FixtureSecrets(BTreeMap<String, SecretEntry>);

#[async_trait]
impl SecretLookup for FixtureSecrets {
    async fn lookup(&self, _namespace: &str, name: &str) -> Result<SecretMaterial, StrixError> {
        let entry = self
            .0
            .get(name)
            .ok_or_else(|| StrixError::not_found("secret", name))?;
        Ok(SecretMaterial {
            private_key: entry.private_key.clone(),
            certificate_chain: entry.certificate_chain.clone(),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    let args = Args::parse();
    info!("{}", strix_xds::version::version_string());

    let text = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading scenario file {}", args.file.display()))?;
    let scenario: Scenario = serde_yaml::from_str(&text).context("parsing scenario file")?;

    let cache = Arc::new(SnapshotCache::new());
    let reconciler = CacheReconciler::new(
        Arc::clone(&cache) as Arc<dyn Cache>,
        Serialization::Yaml,
        ApiVersion::V3,
        Arc::new(FixtureResolver(scenario.endpoints.clone())),
        Arc::new(FixtureSecrets(scenario.secrets.clone())),
    );

    let node = NodeId::new(scenario.node_id.clone());
    let token = CancellationToken::new();

    let runs = if args.twice { 2 } else { 1 };
    let mut tracker = None;
    for run in 1..=runs {
        info!(run, node = %node, "reconciling");
        let result = reconciler
            .reconcile(
                &node,
                &scenario.namespace,
                &scenario.resources,
                &scenario.version_label,
                &token,
            )
            .await
            .context("reconciliation failed")?;
        tracker = Some(result);
    }

    let snapshot = cache.get_snapshot(&node).context("snapshot missing after reconcile")?;
    match snapshot.consistent() {
        Ok(()) => info!("snapshot is internally consistent"),
        Err(e) => tracing::warn!("snapshot has dangling references: {e}"),
    }

    info!(
        resources = snapshot.total_resources(),
        writes = cache.stats().snapshots_set(),
        "done"
    );
    if let Some(tracker) = tracker {
        println!("{}", serde_yaml::to_string(&tracker)?);
    }

    Ok(())
}
