//! kbench Library
//!
//! Core functionality of the kbench benchmarking harness: locating manifest
//! files, decoding them, resolving their API collection and creating or
//! deleting them through a cluster client. The binary wires these together
//! with configuration and logging; the library is also used directly by tests.

pub mod bench;
pub mod cli;
pub mod config;
pub mod deploy;
pub mod kube;

// Re-export commonly used types for convenience
pub use deploy::{
    AggregateError, DeployError, DeploymentEngine, DeploymentTarget, ManifestError, Resource,
    ResourceTypeDescriptor,
};
pub use crate::kube::{ClientError, ClusterClient, KubeClusterClient};
