//! Benchmark run orchestration
//!
//! Deploys every configured manifest set before the benchmark and removes the
//! ones flagged for cleanup afterwards. Each set is attempted even when an
//! earlier one failed; the failures are reported together.

use std::path::PathBuf;

use crate::config::ManifestEntry;
use crate::deploy::{DeployError, DeploymentEngine, Operation, causes};
use crate::kube::ClusterClient;

/// A manifest set that could not be fully deployed or removed
#[derive(Debug)]
pub struct TargetFailure {
    pub path: PathBuf,
    pub namespace: String,
    pub error: DeployError,
}

/// Failures across one or more manifest sets
#[derive(Debug, thiserror::Error)]
#[error("{}", render_failures(.operation, .failures))]
pub struct RunError {
    operation: Operation,
    failures: Vec<TargetFailure>,
}

impl RunError {
    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn failures(&self) -> &[TargetFailure] {
        &self.failures
    }
}

fn render_failures(operation: &Operation, failures: &[TargetFailure]) -> String {
    let mut out = format!("failed to {} {} manifest set(s)", operation, failures.len());
    for failure in failures {
        out.push_str(&format!(
            "\n{} (namespace {}): {}{}",
            failure.path.display(),
            failure.namespace,
            failure.error,
            causes(&failure.error)
        ));
    }
    out
}

/// Apply every entry in order
pub async fn deploy_manifests<C: ClusterClient>(
    engine: &DeploymentEngine<C>,
    entries: &[ManifestEntry],
) -> Result<(), RunError> {
    run(engine, Operation::Apply, entries.iter()).await
}

/// Remove the entries flagged with `cleanup`, in config order
pub async fn cleanup_manifests<C: ClusterClient>(
    engine: &DeploymentEngine<C>,
    entries: &[ManifestEntry],
) -> Result<(), RunError> {
    run(
        engine,
        Operation::Remove,
        entries.iter().filter(|entry| entry.cleanup),
    )
    .await
}

async fn run<'a, C: ClusterClient>(
    engine: &DeploymentEngine<C>,
    operation: Operation,
    entries: impl Iterator<Item = &'a ManifestEntry>,
) -> Result<(), RunError> {
    let mut failures = Vec::new();
    for entry in entries {
        let target = entry.target();
        let result = match operation {
            Operation::Apply => engine.apply_all(&target).await,
            Operation::Remove => engine.remove_all(&target).await,
        };

        match result {
            Ok(()) => tracing::info!(
                path = %target.path.display(),
                namespace = %target.namespace,
                "Finished {} of manifest set",
                operation
            ),
            Err(error) => failures.push(TargetFailure {
                path: target.path,
                namespace: target.namespace,
                error,
            }),
        }
    }

    if failures.is_empty() {
        Ok(())
    } else {
        Err(RunError {
            operation,
            failures,
        })
    }
}
