//! Artifacts configuration
//!
//! Loads and queries the `artifacts.json` document that declares the
//! application's buildable units, pre-built assets, and repository backend.
//! The configuration is read once per invocation and never mutated.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{HobbesError, HobbesResult};

/// Placeholder in `root_directory` that resolves to the directory containing
/// the configuration file.
const ROOT_PLACEHOLDER: &str = "__DIR__";

/// Repository backend selection and options
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryConfig {
    /// Backend tag: "local" or "s3" (case-insensitive)
    pub adapter: String,
    #[serde(default)]
    pub options: RepositoryOptions,
}

/// Backend-specific options; which fields are required depends on the adapter
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RepositoryOptions {
    /// Local backend: repository root directory
    #[serde(default)]
    pub root: Option<String>,
    /// S3 backend: AWS region
    #[serde(default)]
    pub region: Option<String>,
    /// S3 backend: bucket name
    #[serde(default, rename = "bucket-name")]
    pub bucket_name: Option<String>,
    /// S3 backend: optional key prefix
    #[serde(default, rename = "path-prefix")]
    pub path_prefix: Option<String>,
    /// S3 backend: optional shared credentials profile
    #[serde(default)]
    pub profile: Option<String>,
}

/// A buildable unit: source directories, build command, output and deploy
/// locations, and the prefix used to form its artifact identifier.
#[derive(Debug, Clone, Deserialize)]
pub struct Unit {
    pub name: String,
    /// Paths relative to the project root whose tracked content determines
    /// the fingerprint. Order matters for reproducibility.
    pub directories: Vec<String>,
    /// Opaque shell command executed with cwd = project root
    pub command: String,
    pub output_directory: String,
    pub deploy_location: String,
    pub artifact_prefix: String,
}

/// A pre-built deployable blob; no fingerprinting step
#[derive(Debug, Clone, Deserialize)]
pub struct Asset {
    pub name: String,
    /// Repository blob name, taken verbatim (not derived)
    pub filename: String,
    pub deploy_location: String,
}

/// Top-level artifacts.json document
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub application: String,
    pub root_directory: PathBuf,
    pub repository: RepositoryConfig,
    #[serde(default)]
    pub artifacts: Vec<Unit>,
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl Config {
    /// Load the configuration from a JSON file.
    ///
    /// A `root_directory` of `__DIR__` resolves to the directory containing
    /// the configuration file.
    pub fn load(path: &Path) -> HobbesResult<Config> {
        let content = fs::read_to_string(path).map_err(|e| HobbesError::ConfigInvalid {
            message: format!("cannot read {}: {}", path.display(), e),
        })?;

        let mut config: Config =
            serde_json::from_str(&content).map_err(|e| HobbesError::ConfigInvalid {
                message: format!("cannot parse {}: {}", path.display(), e),
            })?;

        if config.root_directory == Path::new(ROOT_PLACEHOLDER) {
            config.root_directory = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(|p| p.to_path_buf())
                .unwrap_or_else(|| PathBuf::from("."));
        }

        Ok(config)
    }

    /// Project root against which unit directories and deploy locations are
    /// resolved.
    pub fn root_dir(&self) -> &Path {
        &self.root_directory
    }

    /// Look up a unit by exact name.
    pub fn unit(&self, name: &str) -> HobbesResult<&Unit> {
        self.artifacts
            .iter()
            .find(|u| u.name == name)
            .ok_or_else(|| HobbesError::UnitNotFound {
                name: name.to_string(),
            })
    }

    /// Units whose name matches the filter (case-insensitive, whitespace
    /// trimmed). An empty filter selects every unit.
    pub fn units_matching(&self, filter: &[String]) -> Vec<&Unit> {
        self.artifacts
            .iter()
            .filter(|u| filter.is_empty() || name_matches(&u.name, filter))
            .collect()
    }

    /// Assets matching the filter minus any excluded names. With neither a
    /// filter nor exclusions, every asset is selected.
    pub fn assets_matching(&self, filter: &[String], exclude: &[String]) -> Vec<&Asset> {
        self.assets
            .iter()
            .filter(|a| !name_matches(&a.name, exclude))
            .filter(|a| filter.is_empty() || name_matches(&a.name, filter))
            .collect()
    }
}

/// Case-insensitive exact match against a list of (possibly padded) names.
fn name_matches(name: &str, patterns: &[String]) -> bool {
    let lowered = name.to_lowercase();
    patterns
        .iter()
        .any(|p| p.trim().to_lowercase() == lowered)
}
