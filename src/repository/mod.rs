//! Artifact repository backends
//!
//! A repository is one flat namespace of immutable named blobs. Backends are
//! selected by the configuration's adapter tag (or forced to local with an
//! explicit override) and validated eagerly: a missing required option is a
//! configuration error, not a deferred failure on first use.

mod local;
mod s3;

use std::path::Path;

pub use local::LocalRepository;
pub use s3::S3Repository;

use crate::config::Config;
use crate::error::{HobbesError, HobbesResult};

/// Uniform store/exists/retrieve operations over a repository backend.
///
/// Entries are immutable once stored; a changed fingerprint produces a new
/// entry rather than updating an old one. Storing under an existing name
/// overwrites it (re-stores are idempotent in practice because names are
/// fingerprint-derived).
pub trait ArtifactRepository: std::fmt::Debug {
    /// Copy/upload the blob at `artifact_path` into the repository under
    /// `artifact_name`, creating any missing containing directory/prefix.
    fn store(&self, artifact_path: &Path, artifact_name: &str) -> HobbesResult<()>;

    /// Existence check only; never downloads content.
    fn exists(&self, artifact_name: &str) -> HobbesResult<bool>;

    /// Copy/download the blob to `destination`, creating missing parent
    /// directories. Absent entries signal `ArtifactMissing`.
    fn retrieve(&self, artifact_name: &str, destination: &Path) -> HobbesResult<()>;
}

/// Build the repository backend selected by the configuration.
///
/// `force_local` selects the local backend regardless of the configured
/// adapter (useful when iterating against a local mirror of the repository).
pub fn from_config(
    config: &Config,
    force_local: bool,
) -> HobbesResult<Box<dyn ArtifactRepository>> {
    let options = &config.repository.options;

    if force_local {
        return local_backend(options.root.as_deref());
    }

    match config.repository.adapter.to_lowercase().as_str() {
        "local" => local_backend(options.root.as_deref()),
        "s3" => {
            let region = options
                .region
                .as_deref()
                .filter(|r| !r.is_empty())
                .ok_or_else(|| HobbesError::ConfigInvalid {
                    message: "S3 region not specified".to_string(),
                })?;
            let bucket = options
                .bucket_name
                .as_deref()
                .filter(|b| !b.is_empty())
                .ok_or_else(|| HobbesError::ConfigInvalid {
                    message: "S3 bucket name not specified".to_string(),
                })?;
            let repository = S3Repository::new(
                region,
                bucket,
                options.path_prefix.as_deref(),
                options.profile.as_deref(),
            )?;
            Ok(Box::new(repository))
        }
        other => Err(HobbesError::ConfigInvalid {
            message: format!("unknown repository adapter type: {other}"),
        }),
    }
}

fn local_backend(root: Option<&str>) -> HobbesResult<Box<dyn ArtifactRepository>> {
    let root = root
        .filter(|r| !r.is_empty())
        .ok_or_else(|| HobbesError::ConfigInvalid {
            message: "local repository root not specified".to_string(),
        })?;
    Ok(Box::new(LocalRepository::new(root)))
}
