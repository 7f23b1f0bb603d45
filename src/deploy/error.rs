//! Deployment error types
//!
//! Batch-level failures (`DeployError::Path`, `DeployError::Discovery`) abort a
//! call outright. Everything that goes wrong with an individual manifest is a
//! `ManifestError`, collected into an `AggregateError` once the whole batch has
//! been attempted.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::kube::ClientError;

/// Direction of a deployment batch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    Apply,
    Remove,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Apply => "apply",
            Operation::Remove => "remove",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors raised while walking a manifest path
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("failed to stat {}", .path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to list directory {}", .path.display())]
    ReadDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("directory {} links back into one of its parents", .path.display())]
    Cycle { path: PathBuf },
}

/// Errors for a single manifest file
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest file")]
    Io(#[source] std::io::Error),

    #[error("failed to decode manifest yaml")]
    Decode(#[source] serde_yaml::Error),

    #[error("manifest contains no document")]
    EmptyDocument,

    #[error("manifest top level is not a mapping")]
    NotAMapping,

    #[error("manifest has no metadata.name")]
    MissingName,

    #[error("unsupported resource kind {kind:?}")]
    UnsupportedResource { kind: String },

    #[error(transparent)]
    Client(#[from] ClientError),
}

/// A manifest that failed, together with the file it came from
#[derive(Debug, Error)]
#[error("{}: {error}", .path.display())]
pub struct ManifestFailure {
    pub path: PathBuf,
    #[source]
    pub error: ManifestError,
}

/// Every per-file failure recorded during one apply or remove batch, in
/// discovery order
#[derive(Debug, Error)]
#[error("{}", render_failures(.operation, .failures))]
pub struct AggregateError {
    operation: Operation,
    failures: Vec<ManifestFailure>,
}

impl AggregateError {
    pub fn new(operation: Operation, failures: Vec<ManifestFailure>) -> Self {
        Self {
            operation,
            failures,
        }
    }

    pub fn operation(&self) -> Operation {
        self.operation
    }

    pub fn failures(&self) -> &[ManifestFailure] {
        &self.failures
    }

    pub fn into_failures(self) -> Vec<ManifestFailure> {
        self.failures
    }

    pub fn len(&self) -> usize {
        self.failures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }
}

fn render_failures(operation: &Operation, failures: &[ManifestFailure]) -> String {
    let mut out = format!("failed to {} {} manifest(s)", operation, failures.len());
    for failure in failures {
        out.push_str(&format!("\n  - {}{}", failure, causes(&failure.error)));
    }
    out
}

/// The `source` chain below `error`, each cause prefixed with `": "`
pub(crate) fn causes(error: &dyn std::error::Error) -> String {
    let mut out = String::new();
    let mut source = error.source();
    while let Some(cause) = source {
        out.push_str(&format!(": {}", cause));
        source = cause.source();
    }
    out
}

/// Errors returned by `DeploymentEngine::apply_all` and `remove_all`
#[derive(Debug, Error)]
pub enum DeployError {
    #[error("failed to resolve manifest path {}", .path.display())]
    Path {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to discover manifests under {}", .path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: DiscoveryError,
    },

    #[error(transparent)]
    Aggregate(#[from] AggregateError),
}

impl DeployError {
    /// The per-file failures, if this is an aggregate
    pub fn as_aggregate(&self) -> Option<&AggregateError> {
        match self {
            DeployError::Aggregate(aggregate) => Some(aggregate),
            _ => None,
        }
    }
}
