//! kbench - deploys Kubernetes manifests for a benchmark run
//!
//! Loads the benchmark configuration, connects to the cluster, applies every
//! configured manifest set and removes the ones flagged for cleanup.

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use kbench::bench;
use kbench::cli::{Args, init_logging};
use kbench::config::ConfigLoader;
use kbench::deploy::DeploymentEngine;
use kbench::kube::{KubeClusterClient, create_client};

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.level());

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<()> {
    let config = ConfigLoader::load(&args.config)?;

    tracing::debug!("Initializing Kubernetes client");
    let client = create_client(config.connection.kubeconfig.as_deref()).await?;
    let engine = DeploymentEngine::new(KubeClusterClient::new(client));

    let manifests = &config.deploy.manifests;
    bench::deploy_manifests(&engine, manifests).await?;
    tracing::info!(sets = manifests.len(), "Deployed manifests");

    bench::cleanup_manifests(&engine, manifests).await?;
    tracing::info!("Cleaned up manifests");

    Ok(())
}
