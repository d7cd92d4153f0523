//! Asset cleanup
//!
//! Clears the deploy locations of configured assets before a redeploy. The
//! deploy directory itself is kept; only its contents are removed. A missing
//! deploy directory is reported and skipped; a removal failure is fatal.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::HobbesResult;

/// Options for one cleanup invocation
#[derive(Debug, Clone, Default)]
pub struct CleanOptions {
    /// Asset name filter (empty = all), matched case-insensitively
    pub filter: Vec<String>,
    /// Asset names to leave untouched
    pub exclude: Vec<String>,
}

impl CleanOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Vec<String>) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }
}

/// What happened to one asset's deploy location
#[derive(Debug, Clone)]
pub struct CleanOutcome {
    pub asset_name: String,
    pub deploy_path: PathBuf,
    /// False when the deploy directory did not exist
    pub cleaned: bool,
}

/// Clear the deploy locations of the selected assets.
pub fn clean_assets(config: &Config, options: &CleanOptions) -> HobbesResult<Vec<CleanOutcome>> {
    let mut outcomes = Vec::new();
    for asset in config.assets_matching(&options.filter, &options.exclude) {
        let deploy_path = config.root_dir().join(&asset.deploy_location);
        if !deploy_path.is_dir() {
            outcomes.push(CleanOutcome {
                asset_name: asset.name.clone(),
                deploy_path,
                cleaned: false,
            });
            continue;
        }
        remove_contents(&deploy_path)?;
        outcomes.push(CleanOutcome {
            asset_name: asset.name.clone(),
            deploy_path,
            cleaned: true,
        });
    }
    Ok(outcomes)
}

/// Remove everything inside `dir`, keeping the directory itself.
fn remove_contents(dir: &Path) -> HobbesResult<()> {
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type()?.is_dir() {
            fs::remove_dir_all(&path)?;
        } else {
            fs::remove_file(&path)?;
        }
    }
    Ok(())
}
