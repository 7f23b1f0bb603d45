//! Configuration for kbench
//!
//! The configuration file names the cluster to connect to and the manifest
//! sets to deploy. It is loaded once at startup and passed down explicitly.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{Config, ConnectionConfig, DeployConfig, ManifestEntry};
