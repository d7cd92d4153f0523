//! `do-deploys` and `deploy-assets` commands

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::fingerprint::GitContentHasher;
use crate::ops::{DeployOptions, DeployRunner, Deployment};
use crate::repository;

/// Deploy every selected application's artifact into its deploy location.
///
/// All artifacts are resolved and verified up front; a single missing one
/// aborts before anything is written.
pub fn run_units(artifacts_path: &Path, force_local: bool, filter: Vec<String>) -> Result<()> {
    let config = Config::load(artifacts_path)?;
    let hasher = GitContentHasher::new();
    let repository = repository::from_config(&config, force_local)?;

    let runner = DeployRunner::new(&config, &hasher, repository.as_ref());
    let options = DeployOptions::new().with_filter(filter);
    let deployments = runner.resolve_units(&options)?;

    if deployments.is_empty() {
        println!("No artifacts found");
        return Ok(());
    }

    deploy_all(&runner, &deployments)
}

/// Deploy every selected pre-built asset into its deploy location.
pub fn run_assets(artifacts_path: &Path, force_local: bool, filter: Vec<String>) -> Result<()> {
    let config = Config::load(artifacts_path)?;
    let hasher = GitContentHasher::new();
    let repository = repository::from_config(&config, force_local)?;

    let runner = DeployRunner::new(&config, &hasher, repository.as_ref());
    let options = DeployOptions::new().with_filter(filter);
    let deployments = runner.resolve_assets(&options)?;

    if deployments.is_empty() {
        println!("No assets found");
        return Ok(());
    }

    deploy_all(&runner, &deployments)
}

fn deploy_all(runner: &DeployRunner<'_>, deployments: &[Deployment]) -> Result<()> {
    for deployment in deployments {
        println!(
            "Found artifact {} for {}",
            deployment.artifact_name, deployment.name
        );
        let temp = runner.fetch(deployment)?;
        println!(" - Downloaded artifact");
        runner.install(deployment, temp.path())?;
        println!(" - Extracted artifact to {}", deployment.deploy_location);
        drop(temp);
        println!(" - Deleted (tar.gz) artifact");
    }
    Ok(())
}
