//! Manifest deployment
//!
//! - `locator` - turns a file or directory path into the manifests to deploy
//! - `manifest` - decodes a manifest file into a generic `Resource`
//! - `resolver` - maps a resource kind to its API collection
//! - `engine` - applies and removes whole manifest sets

mod engine;
mod error;
mod locator;
mod manifest;
mod resolver;

pub use engine::{DeploymentEngine, DeploymentTarget};
pub use error::{
    AggregateError, DeployError, DiscoveryError, ManifestError, ManifestFailure, Operation,
};
pub(crate) use error::causes;
pub use locator::find_manifests;
pub use manifest::{Resource, read_manifest};
pub use resolver::{
    RESOURCE_TYPES, ResourceTypeDescriptor, ResourceTypeEntry, resolve_kind, resolve_type,
    supported_kinds,
};
