//! Configuration schema definitions
//!
//! Defines the structure of the benchmark configuration file using serde.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::deploy::DeploymentTarget;

/// Root configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Cluster connection settings
    #[serde(default)]
    pub connection: ConnectionConfig,

    /// Manifests to deploy
    #[serde(default)]
    pub deploy: DeployConfig,
}

/// Cluster connection configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionConfig {
    /// Path to a kubeconfig file; kube's default inference is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubeconfig: Option<PathBuf>,
}

/// Deployment configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DeployConfig {
    /// Manifest sets, deployed in order
    #[serde(default)]
    pub manifests: Vec<ManifestEntry>,
}

/// One manifest file or directory and where it goes
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ManifestEntry {
    /// Manifest file or directory
    pub path: PathBuf,

    /// Namespace every manifest under `path` is deployed to
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Remove these manifests again once the run is over
    #[serde(default)]
    pub cleanup: bool,
}

impl ManifestEntry {
    pub fn target(&self) -> DeploymentTarget {
        DeploymentTarget::new(self.path.clone(), self.namespace.clone())
    }
}

fn default_namespace() -> String {
    "default".to_string()
}
