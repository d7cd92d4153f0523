//! `do-cleanup` command

use std::path::Path;

use anyhow::Result;

use crate::config::Config;
use crate::ops::{clean_assets, CleanOptions};

/// Clear the deploy locations of the selected assets.
pub fn run(artifacts_path: &Path, filter: Vec<String>, exclude: Vec<String>) -> Result<()> {
    let config = Config::load(artifacts_path)?;
    let options = CleanOptions::new().with_filter(filter).with_exclude(exclude);
    let outcomes = clean_assets(&config, &options)?;

    if outcomes.is_empty() {
        println!("No assets found");
        return Ok(());
    }

    for outcome in outcomes {
        println!(
            "Cleaning up deploy location for {}: {}",
            outcome.asset_name,
            outcome.deploy_path.display()
        );
        if outcome.cleaned {
            println!(" - Successfully cleaned up {}", outcome.deploy_path.display());
        } else {
            println!(" - Directory does not exist: {}", outcome.deploy_path.display());
        }
    }
    Ok(())
}
