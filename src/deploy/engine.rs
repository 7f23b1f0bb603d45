//! Deployment engine
//!
//! Drives discovery, parsing, type resolution and the terminal client call for
//! every manifest under a target path. Apply and remove share the same shape
//! and differ only in the client call and in how the object is addressed: the
//! full body for create, `metadata.name` for delete.

use std::path::{Path, PathBuf};

use tracing::instrument;

use super::error::{AggregateError, DeployError, ManifestError, ManifestFailure, Operation};
use super::locator::find_manifests;
use super::manifest::read_manifest;
use super::resolver::resolve_type;
use crate::kube::ClusterClient;

/// A root path (file or directory) paired with the namespace its manifests
/// are deployed to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentTarget {
    pub path: PathBuf,
    pub namespace: String,
}

impl DeploymentTarget {
    pub fn new(path: impl Into<PathBuf>, namespace: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            namespace: namespace.into(),
        }
    }
}

/// Applies and removes manifest sets through a `ClusterClient`
///
/// Every file is attempted in discovery order, one at a time. Per-file
/// failures are collected and returned together once the batch is done.
pub struct DeploymentEngine<C> {
    client: C,
}

impl<C: ClusterClient> DeploymentEngine<C> {
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Returns a reference to the underlying client
    pub fn client(&self) -> &C {
        &self.client
    }

    /// Create every manifest under `target.path` in `target.namespace`
    #[instrument(skip_all, fields(path = %target.path.display(), namespace = %target.namespace))]
    pub async fn apply_all(&self, target: &DeploymentTarget) -> Result<(), DeployError> {
        self.run(Operation::Apply, target).await
    }

    /// Delete every manifest under `target.path` from `target.namespace`
    #[instrument(skip_all, fields(path = %target.path.display(), namespace = %target.namespace))]
    pub async fn remove_all(&self, target: &DeploymentTarget) -> Result<(), DeployError> {
        self.run(Operation::Remove, target).await
    }

    async fn run(&self, operation: Operation, target: &DeploymentTarget) -> Result<(), DeployError> {
        let root = std::path::absolute(&target.path).map_err(|source| DeployError::Path {
            path: target.path.clone(),
            source,
        })?;

        let manifests = find_manifests(&root).map_err(|source| DeployError::Discovery {
            path: root.clone(),
            source,
        })?;

        tracing::debug!(
            count = manifests.len(),
            "Found manifests to {}",
            operation
        );

        let mut failures = Vec::new();
        for path in manifests {
            let result = match operation {
                Operation::Apply => self.apply_manifest(&path, &target.namespace).await,
                Operation::Remove => self.remove_manifest(&path, &target.namespace).await,
            };
            if let Err(error) = result {
                tracing::warn!(
                    path = %path.display(),
                    error = %error,
                    "Failed to {} manifest",
                    operation
                );
                failures.push(ManifestFailure { path, error });
            }
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(AggregateError::new(operation, failures).into())
        }
    }

    async fn apply_manifest(&self, path: &Path, namespace: &str) -> Result<(), ManifestError> {
        let mut resource = read_manifest(path)?;
        let descriptor = resolve_type(&resource);
        if descriptor.is_empty() {
            return Err(ManifestError::UnsupportedResource {
                kind: resource.kind().unwrap_or_default().to_string(),
            });
        }

        resource.set_namespace(namespace);
        let name = self.client.create(&descriptor, namespace, &resource).await?;

        tracing::debug!(
            kind = resource.kind().unwrap_or_default(),
            name = %name,
            namespace,
            "Applied {} to cluster",
            name
        );
        Ok(())
    }

    async fn remove_manifest(&self, path: &Path, namespace: &str) -> Result<(), ManifestError> {
        let resource = read_manifest(path)?;
        let descriptor = resolve_type(&resource);
        if descriptor.is_empty() {
            return Err(ManifestError::UnsupportedResource {
                kind: resource.kind().unwrap_or_default().to_string(),
            });
        }

        let name = resource.name().ok_or(ManifestError::MissingName)?;
        self.client.delete(&descriptor, namespace, name).await?;

        tracing::debug!(
            kind = resource.kind().unwrap_or_default(),
            name,
            namespace,
            "Removed {} from cluster",
            name
        );
        Ok(())
    }
}
