//! Kubernetes client module
//!
//! Handles connection to the Kubernetes API server and exposes the generic
//! `ClusterClient` the deployment engine works against.
//!
//! The client is built once at startup from the configured kubeconfig and then
//! handed to the engine; nothing in this crate keeps a global client.

mod client;

pub use client::{ClientError, ClusterClient, KubeClusterClient};

#[cfg(test)]
pub use client::MockClusterClient;

use anyhow::{Context, Result};
use kube::config::{KubeConfigOptions, Kubeconfig};
use kube::{Client, Config};
use std::path::Path;

/// Initialize and return a Kubernetes client
///
/// With an explicit kubeconfig path, that file's current context is used.
/// Without one, the default loading strategy applies:
/// 1. KUBECONFIG environment variable
/// 2. ~/.kube/config
/// 3. In-cluster config (if running in a pod)
pub async fn create_client(kubeconfig: Option<&Path>) -> Result<Client> {
    let config = match kubeconfig {
        Some(path) => {
            let kubeconfig = Kubeconfig::read_from(path)
                .with_context(|| format!("Failed to read kubeconfig: {}", path.display()))?;
            Config::from_custom_kubeconfig(kubeconfig, &KubeConfigOptions::default())
                .await
                .with_context(|| {
                    format!("Failed to build client config from {}", path.display())
                })?
        }
        None => Config::infer()
            .await
            .context("Failed to infer Kubernetes client config")?,
    };

    tracing::debug!(cluster_url = %config.cluster_url, "Connecting to Kubernetes cluster");

    let client = Client::try_from(config).context("Failed to create Kubernetes client")?;
    Ok(client)
}
