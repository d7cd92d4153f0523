//! `hash` and `hash-application` commands

use std::path::Path;

use anyhow::Result;

use crate::commands::render_table;
use crate::config::Config;
use crate::error::HobbesResult;
use crate::fingerprint::{ContentHasher, GitContentHasher};

/// Print the fingerprint of arbitrary directories under a project root.
pub fn run_hash(root: &Path, directories: &[String]) -> Result<()> {
    let hasher = GitContentHasher::new();
    let hash = hasher.hash_directories(root, directories)?;
    println!("{hash}");
    Ok(())
}

/// Print the fingerprint of every selected application.
pub fn run_application(artifacts_path: &Path, filter: &[String]) -> Result<()> {
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
            let hash = hasher.hash_directories(config.root_dir(), &unit.directories)?;
            Ok((unit.name.clone(), hash))
        })
        .collect::<HobbesResult<Vec<_>>>()?;

    print!("{}", render_table(("Application", "Hash"), &rows));
    Ok(())
}
