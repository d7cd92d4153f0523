//! `artifact-names` command

use std::path::Path;

use anyhow::Result;

use crate::commands::render_table;
use crate::config::Config;
use crate::error::HobbesResult;
use crate::fingerprint::{artifact_name, GitContentHasher};

/// Print the artifact name of every selected application.
pub fn run(artifacts_path: &Path, filter: &[String]) -> Result<()> {
    let config = Config::load(artifacts_path)?;
    let hasher = GitContentHasher::new();

    let units = config.units_matching(filter);
    if units.is_empty() {
        println!("No artifacts found");
        return Ok(());
    }

    let rows = units
        .iter()
        .map(|unit| {
            let artifact = artifact_name(&config, &hasher, &unit.name)?;
            Ok((unit.name.clone(), artifact))
        })
        .collect::<HobbesResult<Vec<_>>>()?;

    print!("{}", render_table(("Application", "Artifact Name"), &rows));
    Ok(())
}
