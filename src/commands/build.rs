//! `do-builds` command

use std::path::Path;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::fingerprint::GitContentHasher;
use crate::ops::{BuildOptions, BuildRunner, BuildStatus};
use crate::repository;

const PROGRESS_WIDTH: usize = 28;

/// Build every selected application whose artifact is missing, packing and
/// storing each result. A failed unit does not stop the batch, but the
/// command exits non-zero when any unit failed.
pub fn run(artifacts_path: &Path, force_local: bool, filter: Vec<String>, force: bool) -> Result<()> {
    let config = Config::load(artifacts_path)?;
    let hasher = GitContentHasher::new();
    let repository = repository::from_config(&config, force_local)?;

    let runner = BuildRunner::new(&config, &hasher, repository.as_ref());
    let options = BuildOptions::new().with_filter(filter).with_force(force);
    let mut plan = runner.plan(&options)?;

    if plan.is_empty() {
        println!("No artifacts found");
        return Ok(());
    }

    for planned in &plan {
        let answer = if planned.needs_build() { "YES" } else { "NO" };
        println!("Doing build for {} - {}", planned.unit_name, answer);
    }

    let total = plan.iter().filter(|p| p.needs_build()).count();
    let mut completed = 0;
    for planned in plan.iter_mut() {
        if !planned.needs_build() {
            continue;
        }

        let header = format!("Beginning build for {} application", planned.unit_name);
        println!("\n{header}");
        println!("{}", "-".repeat(header.len()));

        runner.execute(planned);
        match planned.status {
            BuildStatus::Stored => {
                completed += 1;
                println!("\n{}", progress_line(completed, total));
                println!("-- Saved {} to repository.", planned.artifact_name);
            }
            BuildStatus::BuildFailed => {
                println!(
                    "\nBuild failed for {}: {}",
                    planned.unit_name,
                    planned.error.as_deref().unwrap_or("unknown error")
                );
            }
            BuildStatus::StoreFailed => {
                println!(
                    "\nFailed to store artifact for {}: {}",
                    planned.unit_name,
                    planned.error.as_deref().unwrap_or("unknown error")
                );
            }
            _ => {}
        }
    }

    let failed = plan.iter().filter(|p| p.status.is_failure()).count();
    if failed > 0 {
        bail!("{failed} build(s) failed");
    }
    Ok(())
}

/// Render a `N/M [====>-----] P%` progress line for the batch.
fn progress_line(completed: usize, total: usize) -> String {
    let filled = if total == 0 {
        PROGRESS_WIDTH
    } else {
        completed * PROGRESS_WIDTH / total
    };
    let mut bar = "=".repeat(filled);
    if filled < PROGRESS_WIDTH {
        bar.push('>');
        bar.push_str(&"-".repeat(PROGRESS_WIDTH - filled - 1));
    }
    let percent = if total == 0 {
        100
    } else {
        completed * 100 / total
    };
    format!("{completed}/{total} [{bar}] {percent}%")
}
