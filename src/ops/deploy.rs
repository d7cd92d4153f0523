//! Deploy orchestrator
//!
//! Deploys assume their artifacts were already built and published: every
//! selected unit's artifact identifier is resolved and checked against the
//! repository before anything is written, and a single missing artifact is
//! fatal for the whole invocation. Units are then deployed independently and
//! sequentially; the first failure aborts the remaining ones, because a
//! partially deployed release is worse than a stopped one.
//!
//! Plain assets follow the same fetch/unpack flow minus fingerprinting: the
//! blob name is taken verbatim from configuration.

use std::fs;
use std::path::Path;

use crate::archive;
use crate::config::Config;
use crate::error::{HobbesError, HobbesResult};
use crate::fingerprint::{artifact_name, ContentHasher};
use crate::repository::ArtifactRepository;

/// Options for one deploy invocation
#[derive(Debug, Clone, Default)]
pub struct DeployOptions {
    /// Unit/asset name filter (empty = all), matched case-insensitively
    pub filter: Vec<String>,
}

impl DeployOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_filter(mut self, filter: Vec<String>) -> Self {
        self.filter = filter;
        self
    }
}

/// A resolved deployment: the blob to fetch and where to unpack it
#[derive(Debug, Clone)]
pub struct Deployment {
    pub name: String,
    pub artifact_name: String,
    pub deploy_location: String,
}

/// Deploy orchestrator over a configuration, content hasher, and repository
pub struct DeployRunner<'a> {
    config: &'a Config,
    hasher: &'a dyn ContentHasher,
    repository: &'a dyn ArtifactRepository,
}

impl<'a> DeployRunner<'a> {
    pub fn new(
        config: &'a Config,
        hasher: &'a dyn ContentHasher,
        repository: &'a dyn ArtifactRepository,
    ) -> Self {
        Self {
            config,
            hasher,
            repository,
        }
    }

    /// Resolve every selected unit to its artifact and verify the artifact
    /// is present in the repository. Any absence means an inconsistent
    /// release and fails the whole invocation before anything is deployed.
    pub fn resolve_units(&self, options: &DeployOptions) -> HobbesResult<Vec<Deployment>> {
        let mut deployments = Vec::new();
        for unit in self.config.units_matching(&options.filter) {
            let artifact = artifact_name(self.config, self.hasher, &unit.name)?;
            if !self.repository.exists(&artifact)? {
                return Err(HobbesError::ArtifactMissing { name: artifact });
            }
            deployments.push(Deployment {
                name: unit.name.clone(),
                artifact_name: artifact,
                deploy_location: unit.deploy_location.clone(),
            });
        }
        Ok(deployments)
    }

    /// Resolve selected plain assets; blob names come verbatim from
    /// configuration, with the same present-or-fatal check as units.
    pub fn resolve_assets(&self, options: &DeployOptions) -> HobbesResult<Vec<Deployment>> {
        let mut deployments = Vec::new();
        for asset in self.config.assets_matching(&options.filter, &[]) {
            if !self.repository.exists(&asset.filename)? {
                return Err(HobbesError::ArtifactMissing {
                    name: asset.filename.clone(),
                });
            }
            deployments.push(Deployment {
                name: asset.name.clone(),
                artifact_name: asset.filename.clone(),
                deploy_location: asset.deploy_location.clone(),
            });
        }
        Ok(deployments)
    }

    /// Fetch one blob into a temporary archive. The returned guard removes
    /// the file when dropped, so the archive is cleaned up on every exit
    /// path whether or not installation happens.
    pub fn fetch(&self, deployment: &Deployment) -> HobbesResult<tempfile::NamedTempFile> {
        let temp = tempfile::Builder::new()
            .prefix("hobbes-")
            .suffix(".tar.gz")
            .tempfile()?;
        self.repository
            .retrieve(&deployment.artifact_name, temp.path())?;
        Ok(temp)
    }

    /// Unpack a fetched archive into the deployment's location under the
    /// project root, creating the directory if absent.
    pub fn install(&self, deployment: &Deployment, archive_path: &Path) -> HobbesResult<()> {
        let dest = self.config.root_dir().join(&deployment.deploy_location);
        fs::create_dir_all(&dest)?;
        archive::unpack(archive_path, &dest)?;
        Ok(())
    }

    /// Fetch and install in one step.
    pub fn deploy(&self, deployment: &Deployment) -> HobbesResult<()> {
        let temp = self.fetch(deployment)?;
        self.install(deployment, temp.path())?;
        Ok(())
    }
}
