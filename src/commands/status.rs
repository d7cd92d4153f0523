//! `should-build` command

use std::path::Path;

use anyhow::Result;

use crate::commands::render_table;
use crate::config::Config;
use crate::fingerprint::GitContentHasher;
use crate::ops::{BuildOptions, BuildRunner};
use crate::repository;

/// Show, per application, whether its artifact is absent from the repository.
pub fn run(artifacts_path: &Path, force_local: bool, filter: &[String]) -> Result<()> {
    let config = Config::load(artifacts_path)?;
    let hasher = GitContentHasher::new();
    let repository = repository::from_config(&config, force_local)?;

    let runner = BuildRunner::new(&config, &hasher, repository.as_ref());
    let options = BuildOptions::new().with_filter(filter.to_vec());
    let planned = runner.plan(&options)?;

    if planned.is_empty() {
        println!("No artifacts found");
        return Ok(());
    }

    let rows = planned
        .into_iter()
        .map(|p| {
            let answer = if p.needs_build() { "YES" } else { "NO" };
            (p.unit_name, answer.to_string())
        })
        .collect::<Vec<_>>();

    print!("{}", render_table(("Application", "Build Needed"), &rows));
    Ok(())
}
