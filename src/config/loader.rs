//! Configuration loading
//!
//! Reads the benchmark configuration file, applies environment variable
//! overrides and validates the result.

use super::schema::Config;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding `connection.kubeconfig`
pub const KUBECONFIG_ENV: &str = "KBENCH_KUBECONFIG";

/// Configuration loader
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load, override and validate the configuration at `path`
    pub fn load(path: &Path) -> Result<Config> {
        let config = Self::load_file(path)?;
        let config = Self::apply_env_overrides(config);
        Self::validate(&config)
            .with_context(|| format!("Invalid config file: {}", path.display()))?;

        tracing::debug!(
            path = %path.display(),
            manifests = config.deploy.manifests.len(),
            "Read and parsed config file"
        );
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load_file(path: &Path) -> Result<Config> {
        if !has_yaml_extension(path) {
            return Err(anyhow::anyhow!(
                "Invalid config file extension, must be *.yaml or *.yml: {}",
                path.display()
            ));
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Config = serde_yaml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Check that every manifest entry is usable
    pub fn validate(config: &Config) -> Result<()> {
        for (index, entry) in config.deploy.manifests.iter().enumerate() {
            if entry.path.as_os_str().is_empty() {
                return Err(anyhow::anyhow!(
                    "deploy.manifests[{}].path cannot be empty",
                    index
                ));
            }
            if entry.namespace.is_empty() {
                return Err(anyhow::anyhow!(
                    "deploy.manifests[{}].namespace cannot be empty",
                    index
                ));
            }
        }
        Ok(())
    }

    /// Apply environment variable overrides
    fn apply_env_overrides(mut config: Config) -> Config {
        // KBENCH_KUBECONFIG override
        if let Ok(kubeconfig) = std::env::var(KUBECONFIG_ENV) {
            if !kubeconfig.is_empty() {
                config.connection.kubeconfig = Some(PathBuf::from(kubeconfig));
            }
        }

        config
    }
}

/// Whether `path` ends in `.yaml` or `.yml`
pub fn has_yaml_extension(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("yaml" | "yml")
    )
}
